use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("resmon version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
