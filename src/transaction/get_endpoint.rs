//! Defines the endpoint for fetching a single transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{
        TransactionId,
        core::{Transaction, get_transaction},
        state::TransactionState,
    },
};

/// A route handler that responds with the transaction as JSON.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    match get(&state, &transaction_id) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_response(),
    }
}

fn get(state: &TransactionState, transaction_id: &str) -> Result<Transaction, Error> {
    let transaction_id: TransactionId = transaction_id.parse()?;
    let connection = state.connection()?;

    get_transaction(transaction_id, &connection)
}
