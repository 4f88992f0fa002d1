//! The fallback for requests to routes that do not exist.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::Message;

/// Respond with a JSON 404 naming the path that was not found.
pub async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {uri}");

    (
        StatusCode::NOT_FOUND,
        Json(Message {
            message: format!("No route for {}", uri.path()),
        }),
    )
        .into_response()
}
