// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Budgetto - manage spending categories from the terminal.
//!
//! This is the binary entry point for the Budgetto client.

mod commands;
mod shell;

use std::path::PathBuf;

use budgetto_config::BudgettoConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::commands::CategoryCommand;

/// Budgetto - manage spending categories from the terminal.
#[derive(Parser, Debug)]
#[command(name = "budgetto", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List, create, update, or delete categories.
    Categories {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// Launch an interactive category shell.
    Shell,
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => budgetto_config::load_and_validate_path(path),
        None => budgetto_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            budgetto_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.ui.log_level);
    if !config.ui.color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Some(Commands::Categories { action }) => commands::run(&config, action).await,
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("budgetto: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn print_config(config: &BudgettoConfig) -> Result<(), commands::CliError> {
    let rendered = config
        .to_redacted_toml()
        .map_err(|e| commands::CliError::Render(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("budgetto={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
