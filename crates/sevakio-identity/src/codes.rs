//! Provider error codes → [`ProviderError`].
//!
//! The provider reports failures as `{"error":{"message":"CODE : detail"}}`.
//! Only the code before ` : ` is significant.

use sevakio_core::ProviderError;

/// Strip any human-readable detail the provider appends to a code.
pub fn error_code(message: &str) -> &str {
  message
    .split_once(" : ")
    .map_or(message, |(code, _)| code)
    .trim()
}

/// Map a provider code onto the closed taxonomy. Unrecognised codes are
/// logged here and never leave this crate.
pub fn map_error_code(message: &str) -> ProviderError {
  let code = error_code(message);
  match code {
    "INVALID_ID_TOKEN" => ProviderError::InvalidToken,
    "TOKEN_EXPIRED" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
      ProviderError::TokenExpired
    }
    "USER_NOT_FOUND" | "EMAIL_NOT_FOUND" => ProviderError::UserNotFound,
    "USER_DISABLED" => ProviderError::UserDisabled,
    "EMAIL_EXISTS" => ProviderError::EmailInUse,
    "WEAK_PASSWORD" => ProviderError::WeakPassword,
    "INVALID_EMAIL" | "MISSING_EMAIL" => ProviderError::InvalidEmail,
    "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
      ProviderError::InvalidCredential
    }
    "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => {
      ProviderError::OperationNotAllowed
    }
    "TOO_MANY_ATTEMPTS_TRY_LATER" => ProviderError::TooManyRequests,
    "INVALID_OOB_CODE" | "EXPIRED_OOB_CODE" => ProviderError::InvalidActionCode,
    other => {
      tracing::warn!(code = other, "unrecognised identity provider error code");
      ProviderError::Unknown
    }
  }
}
