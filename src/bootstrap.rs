//! Run a SQL script against a file-backed SQLite database.

use eyre::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

/// Default database file.
pub const DEFAULT_DB: &str = "school.db";

/// Default script file.
pub const DEFAULT_SCRIPT: &str = "queries.sql";

/// Where to read the script from and which database to run it against.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub db_path: PathBuf,
    pub script_path: PathBuf,
}

impl BootstrapConfig {
    pub fn new(db_path: impl Into<PathBuf>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            script_path: script_path.into(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB, DEFAULT_SCRIPT)
    }
}

/// Read the configured script and execute it.
///
/// Returns the names of the user tables present afterwards.
pub fn run(config: &BootstrapConfig) -> Result<Vec<String>> {
    let script = fs::read_to_string(&config.script_path)
        .with_context(|| format!("Failed to read SQL script {}", config.script_path.display()))?;

    let conn = Connection::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;

    execute_script(&conn, &script)?;
    log::info!(
        "Executed {} against {}",
        config.script_path.display(),
        config.db_path.display()
    );

    list_tables(&conn)
}

/// Execute a batch of statements.
///
/// The connection stays in autocommit mode, so each statement commits on its
/// own unless the script opens its own transaction.
pub fn execute_script(conn: &Connection, script: &str) -> Result<()> {
    conn.execute_batch(script).context("Failed to execute SQL script")
}

/// Names of the non-internal tables, sorted.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("Failed to list tables")?;
    Ok(tables)
}
