//! Defines the endpoint for listing every transaction.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::transaction::{core::list_transactions, state::TransactionState};

/// A route handler that responds with every transaction as JSON, newest first.
pub async fn list_transactions_endpoint(State(state): State<TransactionState>) -> Response {
    let transactions = state
        .connection()
        .and_then(|connection| list_transactions(&connection));

    match transactions {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            error.into_response()
        }
    }
}
