/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation and provides
 * thread-safe and async-safe access patterns using tokio's spawn_blocking.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::errors::IntlError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "dbintl.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "dbintl";

/// Path reported for in-memory databases
const IN_MEMORY_PATH: &str = ":memory:";

const LOCK_CONTEXT: &str = "Failed to acquire database lock";

/// Database connection wrapper with thread-safe access
#[derive(Clone, Debug)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        Ok(Self::from_connection(conn))
    }

    /// Wrap a connection opened by the caller
    pub fn from_connection(conn: Connection) -> Self {
        let db_path = conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(IN_MEMORY_PATH));

        Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        }
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf> {
        // Try to use the system data directory
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the mutex lock and executes the provided closure
    /// with access to the connection. For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> Result<T, IntlError>
    where
        F: FnOnce(&Connection) -> Result<T, IntlError>,
    {
        let conn = self
            .connection
            .lock()
            .map_err(|e| IntlError::connection(LOCK_CONTEXT, e.to_string()))?;

        f(&conn)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T, IntlError>
    where
        F: FnOnce(&Connection) -> Result<T, IntlError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| IntlError::connection(LOCK_CONTEXT, e.to_string()))?;

            f(&conn)
        })
        .await
        .map_err(|e| IntlError::connection("Database task failed", e))?
    }
}
