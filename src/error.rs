//! Error types: store failures, content validation failures, and the HTTP-facing
//! `ApiError` that maps both onto status codes and JSON bodies.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure reported by a `ContentStore`.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The backing database could not be reached or rejected the query.
  /// `MemoryStore` never reports it; a database-backed `ContentStore` does.
  #[allow(dead_code)]
  #[error("store unavailable: {0}")]
  Unavailable(String),

  /// A concurrent sampling task panicked or was cancelled.
  #[error("sampling task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A request body or content bank entry that does not satisfy the schema.
/// The message is client-facing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
  pub fn new(msg: impl Into<String>) -> Self { Self(msg.into()) }
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Store(#[from] StoreError),

  /// Store failure while generating a lesson; rendered with the lesson endpoints' error body.
  #[error("lesson generation failed: {0}")]
  Lesson(StoreError),
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::BadRequest(e.0) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
      }
      ApiError::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
      }
      ApiError::Store(e) => {
        error!(target: "azbuka_backend", error = %e, "Store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "Internal server error" }))).into_response()
      }
      ApiError::Lesson(e) => {
        error!(target: "lesson", error = %e, "Error generating lesson");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Internal Server Error" }))).into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_errors_become_bad_requests() {
    let err: ApiError = ValidationError::new("Invalid level provided.").into();
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn store_and_lesson_failures_are_500() {
    let store = ApiError::Store(StoreError::Unavailable("down".into())).into_response();
    let lesson = ApiError::Lesson(StoreError::Unavailable("timeout".into())).into_response();
    assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(lesson.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
