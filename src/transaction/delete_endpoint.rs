//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error, Message,
    transaction::{TransactionId, core::delete_transaction, state::TransactionState},
};

/// A route handler for deleting a transaction, responds with a JSON message.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    match delete(&state, &transaction_id) {
        Ok(()) => Json(Message {
            message: "Deleted Successfully".to_owned(),
        })
        .into_response(),
        Err(error) => {
            tracing::debug!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

fn delete(state: &TransactionState, transaction_id: &str) -> Result<(), Error> {
    let transaction_id: TransactionId = transaction_id.parse()?;
    let connection = state.connection()?;

    match delete_transaction(transaction_id, &connection)? {
        0 => Err(Error::NotFound),
        _ => {
            tracing::info!("Deleted transaction {transaction_id}");
            Ok(())
        }
    }
}
