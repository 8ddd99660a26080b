//! Error types and axum `IntoResponse` implementation.
//!
//! Bodies carry a machine-readable `kind`, never prose, so clients can map
//! outcomes without parsing messages.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use sevakio_core::{AuthError, ProviderError, RegisterError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation: {0}")]
  Validation(#[from] ValidationError),

  #[error("unauthorized: {0}")]
  Unauthorized(#[from] AuthError),

  /// The body names a different subject than the token proves.
  #[error("subject does not match token")]
  SubjectMismatch,

  #[error("profile already exists for {0}")]
  AlreadyExists(String),

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<RegisterError> for ApiError {
  fn from(err: RegisterError) -> Self {
    match err {
      RegisterError::Validation(e) => ApiError::Validation(e),
      RegisterError::AlreadyExists(id) => ApiError::AlreadyExists(id),
      RegisterError::StoreUnavailable(e) => ApiError::StoreUnavailable(e),
    }
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized(_) | ApiError::SubjectMismatch => {
        StatusCode::UNAUTHORIZED
      }
      ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
      ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match &self {
      ApiError::Validation(e) => json!({ "error": "validation", "field": e.field }),
      ApiError::Unauthorized(AuthError::MissingToken) => {
        json!({ "error": "unauthorized", "reason": "missing_token" })
      }
      // Still a 401: the token was not verified. The reason lets clients
      // keep the session and retry instead of asking for a new sign-in.
      ApiError::Unauthorized(AuthError::InvalidToken(ProviderError::Network)) => {
        json!({ "error": "unauthorized", "reason": "provider_unavailable" })
      }
      ApiError::Unauthorized(AuthError::InvalidToken(_)) => {
        json!({ "error": "unauthorized", "reason": "invalid_token" })
      }
      ApiError::SubjectMismatch => {
        json!({ "error": "unauthorized", "reason": "subject_mismatch" })
      }
      ApiError::AlreadyExists(_) => json!({ "error": "already_exists" }),
      ApiError::StoreUnavailable(_) => json!({ "error": "store_unavailable" }),
    };

    let mut res = (status, Json(body)).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
