//! Classwork CLI - grade tracker and friends.

use chrono::Datelike;
use clap::Parser;
use classwork::bootstrap::{self, BootstrapConfig};
use classwork::{Console, Menu, ServerConfig, profile, server};
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

mod cli;

use cli::{Cli, Command};

fn setup_logging(verbose: bool) -> Result<()> {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
        return Ok(());
    }

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("classwork")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("classwork.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Profile { year } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            profile::run(&mut console, year)?;
        }

        Command::Grades => {
            let stdin = io::stdin();
            let mut menu = Menu::new(stdin.lock(), io::stdout());
            menu.run().context("Grade tracker failed")?;
        }

        Command::Bootstrap { db, script } => {
            let config = BootstrapConfig::new(db, script);
            let tables = bootstrap::run(&config)?;

            println!(
                "{} Executed {} against {}",
                "✓".green(),
                config.script_path.display(),
                config.db_path.display()
            );
            if tables.is_empty() {
                println!("{}", "No tables in database".dimmed());
            } else {
                println!("  Tables: {}", tables.join(", ").cyan());
            }
        }

        Command::Serve { db, addr } => {
            let config = ServerConfig::new(db, addr);
            println!(
                "{} Serving books API on http://{} ({})",
                "→".blue(),
                config.addr,
                config.db_path.display()
            );

            let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
            rt.block_on(server::serve(config)).context("Books API error")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
