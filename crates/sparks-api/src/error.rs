//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error maps to a machine-readable code plus a human message, so
//! callers never see partial-success ambiguity at the protocol level.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("already completed: {0}")]
  AlreadyCompleted(String),

  #[error("already redeemed: {0}")]
  AlreadyRedeemed(String),

  #[error("insufficient spark points: {0}")]
  InsufficientPoints(String),

  #[error("validation error: {0}")]
  Validation(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("upload error: {0}")]
  Upload(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Stable machine-readable code for the response body.
  fn code(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "not_found",
      ApiError::AlreadyCompleted(_) => "already_completed",
      ApiError::AlreadyRedeemed(_) => "already_redeemed",
      ApiError::InsufficientPoints(_) => "insufficient_points",
      ApiError::Validation(_) => "validation_error",
      ApiError::Unauthorized => "unauthorized",
      ApiError::Upload(_) => "upload_error",
      ApiError::Store(_) => "storage_error",
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::AlreadyCompleted(_) | ApiError::AlreadyRedeemed(_) => {
        StatusCode::CONFLICT
      }
      ApiError::InsufficientPoints(_) | ApiError::Validation(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Upload(_) | ApiError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  /// Wrap a storage-backend failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(err))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = json!({
      "error":   self.code(),
      "message": self.to_string(),
    });

    let mut response = (status, Json(body)).into_response();
    if status == StatusCode::UNAUTHORIZED {
      response.headers_mut().insert(
        axum::http::header::WWW_AUTHENTICATE,
        axum::http::HeaderValue::from_static("Basic realm=\"solo-sparks\""),
      );
    }
    response
  }
}
