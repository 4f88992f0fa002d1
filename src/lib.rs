//! Ledgerly is a web app for tracking personal finances.
//!
//! This library provides a JSON REST API for recording transactions and a
//! server-rendered dashboard with an add/edit form and a monthly chart.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod logging;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::{ConnectionMode, SharedConnection, connect, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{Transaction, TransactionId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction ID in the request path is not a positive integer.
    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidTransactionId(String),

    /// The request body could not be parsed, or a field had the wrong type.
    ///
    /// The string describes what was wrong with the body and is safe to show
    /// to the client.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A required field was absent from the body of a create request.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An update named no fields, or every field it named already held the
    /// requested value.
    #[error("the update did not change the transaction")]
    NoChanges,

    /// The database connection string is empty or uses an unsupported scheme.
    #[error("invalid database connection string \"{0}\"")]
    InvalidConnectionString(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body used for error responses and simple acknowledgements.
#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidTransactionId(_) | Error::InvalidBody(_) | Error::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound | Error::NoChanges => StatusCode::NOT_FOUND,
            Error::InvalidConnectionString(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            Error::InvalidTransactionId(id) => format!("Invalid transaction ID \"{id}\""),
            Error::InvalidBody(reason) => format!("Invalid request body: {reason}"),
            Error::MissingField(field) => format!("{} is required", capitalize(field)),
            Error::NotFound => "Transaction not found".to_owned(),
            Error::NoChanges => "No changes were made to the transaction".to_owned(),
            // Storage faults are not intended to be shown to the client.
            Error::InvalidConnectionString(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                "Internal server error".to_owned()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        let body = Message {
            message: self.client_message(),
        };

        (status_code, Json(body)).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
