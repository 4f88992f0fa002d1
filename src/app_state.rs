//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::{SharedConnection, initialize},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection shared by all requests.
    pub db_connection: SharedConnection,
}

impl AppState {
    /// Create a new [AppState] from a connection handle obtained with [crate::connect].
    pub fn new(db_connection: SharedConnection) -> Self {
        Self { db_connection }
    }

    /// Create a new [AppState] that owns `db_connection`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn from_connection(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self::new(Arc::new(Mutex::new(db_connection))))
    }
}
