use axum::{body::Body, http::StatusCode, response::Response};
use serde::de::DeserializeOwned;

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).unwrap_or_else(|error| {
        panic!(
            "Could not parse response body {:?} as JSON: {error}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Assert that the JSON body of `response` has a `message` field equal to `want`.
pub(crate) async fn assert_message(response: Response<Body>, want: &str) {
    let body: serde_json::Value = parse_json(response).await;

    assert_eq!(body["message"], want, "got body {body}");
}
