//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{
        core::{InsertResult, NewTransaction, create_transaction},
        input::{CreateTransactionBody, body_rejection},
        state::TransactionState,
    },
};

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created` and the insert acknowledgement on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Response {
    match create(&state, body) {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(error) => {
            tracing::debug!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}

fn create(
    state: &TransactionState,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Result<InsertResult, Error> {
    let Json(body) = body.map_err(body_rejection)?;
    let new_transaction = NewTransaction::try_from(body)?;

    let connection = state.connection()?;
    let transaction = create_transaction(new_transaction, &connection)?;
    tracing::info!("Created transaction {}", transaction.id);

    Ok(InsertResult {
        acknowledged: true,
        inserted_id: transaction.id,
    })
}
