use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ot_cli::commands::overtime::OutputFormat;
use ot_cli::commands::{overtime, records, settings, summary};
use ot_cli::store::JsonFileStore;
use ot_cli::{Cli, Commands, Config};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Overtime { grid, detail, json }) => {
            let format = if *json {
                OutputFormat::Json
            } else if *detail {
                OutputFormat::Detail
            } else {
                OutputFormat::Plain
            };
            if !overtime::run(&mut stdout, grid.as_deref(), &config, format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Records { grid }) => {
            records::run(&mut stdout, grid.as_deref(), &config)?;
        }
        Some(Commands::Summary { grid, json }) => {
            summary::run(&mut stdout, grid.as_deref(), &config, *json)?;
        }
        Some(Commands::Config(action)) => {
            let mut store = JsonFileStore::new(&config.settings_path);
            settings::run(&mut stdout, action, &mut store)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(ExitCode::SUCCESS)
}
