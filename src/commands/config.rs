use crate::core::config::CONFIG_KEYS;
use crate::core::Config;
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", _)) => reset(),
        Some(("path", _)) => path(),
        _ => {
            println!("Use 'resmon config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", json);
    Ok(())
}

fn set(matches: &ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    if let Err(e) = config.set_value(key, value) {
        eprintln!("{}", format!("✗ {}", e).red());
        println!(
            "{}",
            format!("Valid keys: {}", CONFIG_KEYS.join(", ")).dimmed()
        );
        return Err(e);
    }
    config.save()?;

    println!("{} {}", format!("✓ {} set to:", key).green(), value.cyan().bold());
    Ok(())
}

fn reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}

fn path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    Ok(())
}
