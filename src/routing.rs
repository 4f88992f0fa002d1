//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        );

    let view_routes = Router::new().route(endpoints::ROOT, get(get_dashboard_page));

    api_routes
        .merge(view_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, TransactionId, build_router, endpoints, endpoints::format_endpoint};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::from_connection(connection).expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create(server: &TestServer, body: Value) -> TransactionId {
        let response = server.post(endpoints::TRANSACTIONS).json(&body).await;
        response.assert_status(StatusCode::CREATED);

        let result: Value = response.json();
        assert_eq!(result["acknowledged"], true);
        let id = result["insertedId"]
            .as_i64()
            .expect("insertedId should be an integer");

        TransactionId::new(id)
    }

    async fn list(server: &TestServer) -> Vec<Value> {
        let response = server.get(endpoints::TRANSACTIONS).await;
        response.assert_status_ok();

        response.json()
    }

    #[tokio::test]
    async fn create_update_delete_round_trip() {
        let server = get_test_server();

        let id = create(
            &server,
            json!({"amount": 42, "date": "2024-03-01", "description": "coffee"}),
        )
        .await;
        let item_path = format_endpoint(endpoints::TRANSACTION, id);

        let transactions = list(&server).await;
        let created = transactions
            .iter()
            .find(|transaction| transaction["id"] == id.as_i64())
            .expect("created transaction should be listed");
        assert_eq!(created["amount"], 42.0);

        let response = server.put(&item_path).json(&json!({"amount": 50})).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["updated"]["modifiedCount"], 1);

        let transactions = list(&server).await;
        let updated = transactions
            .iter()
            .find(|transaction| transaction["id"] == id.as_i64())
            .expect("updated transaction should still be listed");
        assert_eq!(updated["amount"], 50.0);
        assert_eq!(updated["description"], "coffee");

        let response = server.delete(&item_path).await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "Deleted Successfully"}));

        let transactions = list(&server).await;
        assert!(
            transactions
                .iter()
                .all(|transaction| transaction["id"] != id.as_i64()),
            "want transaction {id} to be gone from {transactions:?}"
        );
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let server = get_test_server();
        for (date, description) in [
            ("2024-01-10", "oldest"),
            ("2024-03-05", "newest"),
            ("2024-02-20", "middle"),
        ] {
            create(
                &server,
                json!({"amount": 1, "date": date, "description": description}),
            )
            .await;
        }

        let descriptions: Vec<Value> = list(&server)
            .await
            .into_iter()
            .map(|transaction| transaction["description"].clone())
            .collect();

        assert_eq!(descriptions, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn get_returns_single_transaction() {
        let server = get_test_server();
        let id = create(
            &server,
            json!({"amount": "9.5", "date": "2024-03-01T10:00:00Z", "description": "lunch"}),
        )
        .await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": id.as_i64(),
            "amount": 9.5,
            "date": "2024-03-01",
            "description": "lunch"
        }));
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server.delete("/transactions/999").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"message": "Transaction not found"}));
    }

    #[tokio::test]
    async fn updating_missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server
            .put("/transactions/999")
            .json(&json!({"amount": 1}))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({"message": "Transaction not found"}));
    }

    #[tokio::test]
    async fn empty_update_is_no_change() {
        let server = get_test_server();
        let id = create(
            &server,
            json!({"amount": 42, "date": "2024-03-01", "description": "coffee"}),
        )
        .await;

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, id))
            .json(&json!({}))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({"message": "No changes were made to the transaction"}));
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected_without_crashing() {
        let server = get_test_server();

        for path in ["/transactions/abc", "/transactions/0", "/transactions/65f1c0ffee0123"] {
            server
                .put(path)
                .json(&json!({"amount": 1}))
                .await
                .assert_status_bad_request();
            server.delete(path).await.assert_status_bad_request();
        }

        // The server still works afterwards.
        server.get(endpoints::TRANSACTIONS).await.assert_status_ok();
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"amount": 42, "date": "2024-03-01"}))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({"message": "Description is required"}));
        assert!(list(&server).await.is_empty());
    }

    #[tokio::test]
    async fn create_with_invalid_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/nope").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"message": "No route for /nope"}));
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let server = get_test_server();
        create(
            &server,
            json!({"amount": 42, "date": "2024-03-01", "description": "coffee"}),
        )
        .await;

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text_contains("coffee");
        response.assert_text_contains("monthly-chart");
    }
}

#[cfg(test)]
mod storage_fault_tests {
    use std::thread;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, endpoints};

    fn get_test_server_and_state() -> (TestServer, AppState) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::from_connection(connection).expect("Could not create app state");
        let server = TestServer::try_new(build_router(state.clone()))
            .expect("Could not create test server.");

        (server, state)
    }

    async fn assert_internal_server_error(server: &TestServer) {
        for response in [
            server.get(endpoints::TRANSACTIONS).await,
            server.get(endpoints::ROOT).await,
            server.delete("/transactions/1").await,
        ] {
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            response.assert_json(&json!({"message": "Internal server error"}));
        }
    }

    #[tokio::test]
    async fn poisoned_lock_is_internal_server_error() {
        let (server, state) = get_test_server_and_state();
        let connection = state.db_connection.clone();

        let result = thread::spawn(move || {
            let _guard = connection.lock().unwrap();
            panic!("panicking while holding the database lock");
        })
        .join();
        assert!(result.is_err());
        assert!(state.db_connection.is_poisoned());

        assert_internal_server_error(&server).await;
    }

    #[tokio::test]
    async fn missing_table_is_internal_server_error() {
        let (server, state) = get_test_server_and_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE \"transaction\"", ())
            .expect("Could not drop transaction table");

        assert_internal_server_error(&server).await;
    }
}
