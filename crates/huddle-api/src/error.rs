//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use huddle_core::{AsCoreError, Error as CoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Unprocessable(String),

  /// The cause is logged by [`ApiError::from_store`] and kept out of the
  /// response body.
  #[error("Internal server error")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Convert a backend error, keeping its domain classification if it has
  /// one. Logs the rejection.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + AsCoreError + Send + Sync + 'static,
  {
    if let Some(core) = err.as_core() {
      tracing::warn!(error = ?core, "request rejected");
      return ApiError::from(core.clone());
    }
    tracing::error!(error = %err, "store failure");
    ApiError::Store(Box::new(err))
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      e if e.is_not_found() => ApiError::NotFound(e.to_string()),
      e @ CoreError::DuplicateKey(_) => ApiError::Conflict(e.to_string()),
      e => ApiError::Unprocessable(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "detail": self.to_string() }))).into_response()
  }
}
