//! fittrack - body metrics and workout recency tracking.
//!
//! This is the main entry point for the fittrack CLI tool.

use std::process::ExitCode;

use clap::Parser;
use fittrack::cli::{init_logging, Cli, CliResult, Commands, ConfigCommands, HistoryCommands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: CliResult = match cli.command {
        None => {
            // No subcommand provided - show help
            println!("fittrack - body metrics and workout recency tracking.");
            println!();
            println!("Run 'fittrack --help' for available commands.");
            println!();
            println!("Quick start:");
            println!("  fittrack metrics --height 180 --weight 78.5 --waist 85 --hip 95 --age 30 --sex male");
            println!("  fittrack watch https://videos.example/hiit --name \"HIIT 20\"");
            println!("  fittrack recent");
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Metrics(c) => c.execute(),
            Commands::History(subcmd) => match subcmd {
                HistoryCommands::Add(c) => c.execute(),
                HistoryCommands::List(c) => c.execute(),
            },
            Commands::Watch(c) => c.execute(),
            Commands::Recent(c) => c.execute(),
            Commands::Config(subcmd) => match subcmd {
                ConfigCommands::Show(c) => c.execute(),
                ConfigCommands::Get(c) => c.execute(),
                ConfigCommands::Set(c) => c.execute(),
                ConfigCommands::Reset(c) => c.execute(),
                ConfigCommands::Explain(c) => c.execute(),
            },
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e:#}");
            ExitCode::FAILURE
        }
    }
}
