//! Connection lifecycle for the application's SQLite database.
//!
//! The process holds one long-lived connection handle that every request
//! shares. In development mode handles are cached process-wide by connection
//! string, so building the app again (e.g., after a live reload) reuses the
//! open connection instead of opening another one.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, transaction::create_transaction_table};

/// A database connection that can be shared between request handlers.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Controls whether connection handles are reused across initialisations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConnectionMode {
    /// Cache handles process-wide and hand out the cached one on later calls.
    Development,
    /// Open a fresh handle on every call.
    Production,
}

impl ConnectionMode {
    /// Development for debug builds, production for release builds.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            ConnectionMode::Development
        } else {
            ConnectionMode::Production
        }
    }
}

/// Where a connection string points to.
#[derive(Debug, PartialEq)]
enum StorageTarget {
    Memory,
    File(PathBuf),
}

const SQLITE_SCHEME: &str = "sqlite://";

fn parse_connection_string(connection_string: &str) -> Result<StorageTarget, Error> {
    let trimmed = connection_string.trim();
    let invalid = || Error::InvalidConnectionString(connection_string.to_owned());

    if trimmed.is_empty() {
        return Err(invalid());
    }

    if trimmed == ":memory:" || trimmed == "sqlite::memory:" {
        return Ok(StorageTarget::Memory);
    }

    if let Some(path) = trimmed.strip_prefix(SQLITE_SCHEME) {
        return if path.is_empty() {
            Err(invalid())
        } else {
            Ok(StorageTarget::File(PathBuf::from(path)))
        };
    }

    // Any other URL scheme, e.g. "postgres://", is not something we can open.
    if trimmed.contains("://") {
        return Err(invalid());
    }

    Ok(StorageTarget::File(PathBuf::from(trimmed)))
}

/// Get the connection handle for `connection_string`.
///
/// In [ConnectionMode::Development] the first call for a connection string
/// opens and caches the handle, and later calls return a clone of the cached
/// handle. In [ConnectionMode::Production] every call opens a new handle.
///
/// Newly opened databases are initialised with [initialize].
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidConnectionString] if `connection_string` is empty or has an unsupported scheme,
/// - [Error::DatabaseLockError] if the development cache lock is poisoned,
/// - or [Error::SqlError] if the database cannot be opened or initialised.
pub fn connect(connection_string: &str, mode: ConnectionMode) -> Result<SharedConnection, Error> {
    match mode {
        ConnectionMode::Production => open(connection_string),
        ConnectionMode::Development => {
            static CONNECTIONS: OnceLock<Mutex<HashMap<String, SharedConnection>>> =
                OnceLock::new();

            let mut connections = CONNECTIONS
                .get_or_init(Default::default)
                .lock()
                .map_err(|_| Error::DatabaseLockError)?;

            if let Some(connection) = connections.get(connection_string) {
                tracing::debug!("Reusing cached database connection");
                return Ok(connection.clone());
            }

            let connection = open(connection_string)?;
            connections.insert(connection_string.to_owned(), connection.clone());

            Ok(connection)
        }
    }
}

fn open(connection_string: &str) -> Result<SharedConnection, Error> {
    let connection = match parse_connection_string(connection_string)? {
        StorageTarget::Memory => Connection::open_in_memory()?,
        StorageTarget::File(path) => {
            tracing::info!("Opening database at {}", path.display());
            Connection::open(path)?
        }
    };

    initialize(&connection)?;

    Ok(Arc::new(Mutex::new(connection)))
}

/// Create all of the database tables for the application.
///
/// Safe to call on an already initialised database.
///
/// # Errors
/// Returns an error if the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
