//! Shared plumbing for the API handlers.
//!
//! Every handler runs its database work through [`with_conn`], which checks
//! a connection out of the pool on the blocking thread pool and hands it to
//! a closure. Failures surface as [`ApiError`], rendered as
//! `{"error": "<message>"}` with a 400 or 500 status.

use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sakila_store::StoreError;
use sakila_types::InputError;
use std::sync::Arc;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => {
                tracing::error!(error = %e, "database operation failed");
                ApiError::InternalServerError(e.to_string())
            }
            StoreError::InvalidInput(msg)
            | StoreError::NotFound(msg)
            | StoreError::Unavailable(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// # Errors
///
/// Returns `ApiError::InternalServerError` if no connection can be checked
/// out or the blocking task panics, and whatever `f` returns otherwise.
pub(crate) async fn with_conn<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Connection) -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let conn = state
            .pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        f(&conn)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))?
}

/// Parses a numeric path segment, naming `field` on failure.
pub(crate) fn path_id(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {field}: {raw}")))
}
