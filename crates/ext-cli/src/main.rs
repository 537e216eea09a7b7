//! Extension Manager CLI
//!
//! Inspects, validates and updates the extensions under a working root.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {e}", "warning".yellow());
    }

    let Some(command) = cli.command.clone() else {
        println!("{} Extension Manager CLI", "extmgr".green().bold());
        println!();
        println!("Run {} for available commands.", "extmgr --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        commands::run_completions(shell);
        return Ok(());
    }

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    tracing::debug!(root = %root.display(), "Loading extensions");
    let ctx = Context::load(&root, cli.hard_override())?;

    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { all, json } => commands::run_list(ctx, all, json),
        Commands::Check => commands::run_check(ctx),
        Commands::Info { name, json } => commands::run_info(ctx, &name, json),
        Commands::CheckUpdates { name } => commands::run_check_updates(ctx, name.as_deref()),
        Commands::Update {
            name,
            reference,
            yes,
        } => commands::run_update(ctx, &name, &reference, yes),
        Commands::Files {
            name,
            subdir,
            extension,
        } => commands::run_files(ctx, &name, &subdir, &extension),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
