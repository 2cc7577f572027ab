//! CAPL Tools CLI
//!
//! The command-line interface for scanning and editing CAPL source files.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    // Execute command
    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} CAPL Tools CLI", "capl".green().bold());
            println!();
            println!("Run {} for available commands.", "capl --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Scan { file, kind, json } => commands::run_scan(&file, kind.as_deref(), json),
        Commands::Insert {
            file,
            at,
            code,
            from_file,
            backup,
            dry_run,
        } => {
            let code = commands::load_code(code, from_file.as_deref())?;
            commands::run_insert(&file, &at, &code, backup, dry_run)
        }
        Commands::Remove {
            file,
            names,
            backup,
            dry_run,
        } => commands::run_remove(&file, &names, backup, dry_run),
        Commands::Replace {
            file,
            name,
            code,
            from_file,
            backup,
            dry_run,
        } => {
            let code = commands::load_code(code, from_file.as_deref())?;
            commands::run_replace(&file, &name, &code, backup, dry_run)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
