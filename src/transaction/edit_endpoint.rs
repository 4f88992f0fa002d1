//! Defines the endpoint for updating part of a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    Error,
    transaction::{
        TransactionId,
        core::{TransactionPatch, UpdateResult, update_transaction},
        input::{UpdateTransactionBody, body_rejection},
        state::TransactionState,
    },
};

/// The JSON body sent after a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Always `true`; failures are reported with an error status instead.
    pub success: bool,
    /// The acknowledgement from the database.
    pub updated: UpdateResult,
}

/// A route handler for merging the fields in the request body into a transaction.
///
/// The ID is validated before the body so that a malformed ID is always
/// reported as such.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    body: Result<Json<UpdateTransactionBody>, JsonRejection>,
) -> Response {
    match edit(&state, &transaction_id, body) {
        Ok(updated) => Json(UpdateResponse {
            success: true,
            updated,
        })
        .into_response(),
        Err(error) => {
            tracing::debug!("Could not update transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

fn edit(
    state: &TransactionState,
    transaction_id: &str,
    body: Result<Json<UpdateTransactionBody>, JsonRejection>,
) -> Result<UpdateResult, Error> {
    let transaction_id: TransactionId = transaction_id.parse()?;
    let Json(body) = body.map_err(body_rejection)?;
    let patch = TransactionPatch::try_from(body)?;

    // Hold the lock across the read and the write so the change check stays valid.
    let connection = state.connection()?;
    let result = update_transaction(transaction_id, &patch, &connection)?;
    tracing::info!("Updated transaction {transaction_id}");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        test_utils::{assert_message, parse_json},
        transaction::{
            Transaction,
            core::{create_transaction, get_transaction},
            edit_endpoint::edit_transaction_endpoint,
            input::{AmountInput, UpdateTransactionBody},
            state::TransactionState,
        },
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn must_create_test_transaction(state: &TransactionState) -> Transaction {
        create_transaction(
            Transaction::build(42.0, date!(2024 - 03 - 01), "coffee"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("could not create test transaction")
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = get_test_state();
        let transaction = must_create_test_transaction(&state);
        let body = UpdateTransactionBody {
            amount: Some(AmountInput::Number(50.0)),
            date: Some("2024-03-02".to_owned()),
            description: None,
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id.to_string()),
            Ok(Json(body)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let got_body: serde_json::Value = parse_json(response).await;
        assert_eq!(
            got_body,
            serde_json::json!({
                "success": true,
                "updated": {"acknowledged": true, "matchedCount": 1, "modifiedCount": 1}
            })
        );
        let got = get_transaction(transaction.id, &state.db_connection.lock().unwrap())
            .expect("could not get test transaction");
        assert_eq!(
            got,
            Transaction {
                amount: 50.0,
                date: date!(2024 - 03 - 02),
                ..transaction
            }
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let body = UpdateTransactionBody {
            amount: Some(AmountInput::Number(50.0)),
            ..Default::default()
        };

        let response =
            edit_transaction_endpoint(State(get_test_state()), Path("12".to_owned()), Ok(Json(body)))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_message(response, "Transaction not found").await;
    }

    #[tokio::test]
    async fn empty_update_reports_no_changes() {
        let state = get_test_state();
        let transaction = must_create_test_transaction(&state);

        let response = edit_transaction_endpoint(
            State(state),
            Path(transaction.id.to_string()),
            Ok(Json(UpdateTransactionBody::default())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_message(response, "No changes were made to the transaction").await;
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let body = UpdateTransactionBody {
            amount: Some(AmountInput::Number(50.0)),
            ..Default::default()
        };

        let response = edit_transaction_endpoint(
            State(get_test_state()),
            Path("65f1c0ffee".to_owned()),
            Ok(Json(body)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_message(response, "Invalid transaction ID \"65f1c0ffee\"").await;
    }
}
