use anyhow::{bail, Context, Result};
use clap::{ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions for the specified shell
pub fn execute(matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    let shell_str = matches
        .get_one::<String>("shell")
        .context("Shell argument is required")?;

    let shell = match shell_str.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => bail!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish, powershell, elvish",
            shell_str
        ),
    };

    generate(shell, cli, "resmon", &mut io::stdout());
    Ok(())
}
