//! Error taxonomy shared by every Sevakio crate.
//!
//! Every variant is a closed, machine-readable kind. Prose for end users is
//! the client's business; nothing here carries raw provider strings.

use thiserror::Error;

// ─── Provider ────────────────────────────────────────────────────────────────

/// Failure reported by the external Identity Provider, normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProviderError {
  #[error("token is malformed or revoked")]
  InvalidToken,
  #[error("token has expired")]
  TokenExpired,
  #[error("no account for this identity")]
  UserNotFound,
  #[error("account is disabled")]
  UserDisabled,
  #[error("email is already in use")]
  EmailInUse,
  #[error("password is too weak")]
  WeakPassword,
  #[error("email address is invalid")]
  InvalidEmail,
  #[error("credentials were rejected")]
  InvalidCredential,
  #[error("operation is disabled for this project")]
  OperationNotAllowed,
  #[error("too many requests")]
  TooManyRequests,
  #[error("action code is invalid or expired")]
  InvalidActionCode,
  #[error("identity provider unreachable")]
  Network,
  #[error("unrecognised provider error")]
  Unknown,
}

// ─── Token verification ──────────────────────────────────────────────────────

/// Why a bearer token was not accepted. Both variants are terminal for the
/// request and map to an authorization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
  #[error("missing bearer token")]
  MissingToken,
  #[error("invalid bearer token: {0}")]
  InvalidToken(ProviderError),
}

// ─── Registration ────────────────────────────────────────────────────────────

/// A required registration field was absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing required field `{field}`")]
pub struct ValidationError {
  pub field: &'static str,
}

impl ValidationError {
  pub fn missing(field: &'static str) -> Self { Self { field } }
}

#[derive(Debug, Error)]
pub enum RegisterError {
  /// Rejected before touching the store.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A profile already exists for this subject; the caller should log in.
  #[error("profile already exists for subject {0}")]
  AlreadyExists(String),

  /// Transient infrastructure failure; the caller may retry later.
  #[error("profile store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = RegisterError> = std::result::Result<T, E>;
