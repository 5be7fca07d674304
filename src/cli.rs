//! CLI argument parsing for Classwork.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cw",
    about = "Grade tracker, profile builder, SQLite bootstrap and books API exercises",
    version,
    after_help = "Logs are written to: ~/.local/share/classwork/logs/classwork.log"
)]
pub struct Cli {
    /// Send debug logs to stderr instead of the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a user profile from interactive answers
    Profile {
        /// Year used to compute age (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Run the interactive student grade tracker
    Grades,

    /// Execute a SQL script against a SQLite database file
    Bootstrap {
        /// Database file (created if missing)
        #[arg(long, default_value = classwork::bootstrap::DEFAULT_DB)]
        db: PathBuf,

        /// SQL script to execute
        #[arg(short, long, default_value = classwork::bootstrap::DEFAULT_SCRIPT)]
        script: PathBuf,
    },

    /// Serve the books CRUD API
    Serve {
        /// Database file backing the API
        #[arg(long, default_value = classwork::books::DEFAULT_DB)]
        db: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = classwork::server::DEFAULT_ADDR)]
        addr: SocketAddr,
    },
}
