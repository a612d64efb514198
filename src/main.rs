use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use resmon::commands;

fn build_cli() -> Command {
    Command::new("resmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reports resource-hungry processes and a system health snapshot as JSON")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("intensive")
                .about("Show the top CPU, memory and network consuming processes"),
        )
        .subcommand(
            Command::new("processes")
                .about("List processes of one category, sorted and paginated")
                .arg(
                    Arg::new("type")
                        .help("Process category: cpu, memory or network")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("N")
                        .help("Page number, starting at 1")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("page-size")
                        .short('s')
                        .long("page-size")
                        .value_name("N")
                        .help("Processes per page (1-100)")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("sort-by")
                        .long("sort-by")
                        .value_name("FIELD")
                        .help("auto, pid, command or a metric of the category"),
                )
                .arg(
                    Arg::new("sort-order")
                        .long("sort-order")
                        .value_name("ORDER")
                        .help("asc or desc"),
                ),
        )
        .subcommand(
            Command::new("overview")
                .about("Show a CPU, memory, disk, network and host snapshot with analysis"),
        )
        .subcommand(
            Command::new("tool")
                .about("Invoke a query by its tool name")
                .arg(
                    Arg::new("name")
                        .help("Tool name, or list_tools")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("args")
                        .short('a')
                        .long("args")
                        .value_name("JSON")
                        .help("Tool arguments as a JSON object"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Answer line-delimited JSON tool requests on stdin until EOF"),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'resmon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("command_timeout_secs, top_processes, network_overview_processes or default_page_size")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value")
                                .required(true)
                                .index(2),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("bash, zsh, fish, powershell or elvish")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() -> Result<()> {
    resmon::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("intensive", _)) => commands::intensive(),
        Some(("processes", sub_matches)) => commands::processes::execute(sub_matches),
        Some(("overview", _)) => commands::overview(),
        Some(("tool", sub_matches)) => commands::tool::execute(sub_matches),
        Some(("serve", _)) => commands::serve::execute(),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("version", _)) => commands::version(),
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            commands::completions::execute(sub_matches, &mut cli)
        }
        _ => {
            println!("Use 'resmon --help' for more information.");
            Ok(())
        }
    }
}
