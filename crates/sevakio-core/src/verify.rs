//! Token Verifier — bearer parsing plus delegation to the Identity Provider.

use std::sync::Arc;

use crate::{
  claim::IdentityClaim, error::AuthError, provider::IdentityProvider,
};

/// Extract the token from an authorization value.
///
/// Accepts `Bearer <token>` (scheme matched case-insensitively) or a bare
/// token. Returns `None` when nothing remains after stripping the scheme.
pub fn bearer_token(raw: &str) -> Option<&str> {
  let raw = raw.trim();
  let token = match raw.split_once(char::is_whitespace) {
    Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => {
      rest.trim()
    }
    _ if raw.eq_ignore_ascii_case("bearer") => "",
    _ => raw,
  };
  (!token.is_empty()).then_some(token)
}

/// Validates bearer tokens against an injected [`IdentityProvider`].
///
/// Performs no signature checking of its own, no retries, and no caching.
pub struct TokenVerifier<P> {
  provider: Arc<P>,
}

impl<P> Clone for TokenVerifier<P> {
  fn clone(&self) -> Self {
    Self { provider: Arc::clone(&self.provider) }
  }
}

impl<P: IdentityProvider> TokenVerifier<P> {
  pub fn new(provider: Arc<P>) -> Self { Self { provider } }

  /// Verify the token carried by `raw` (an `Authorization` header value).
  ///
  /// Empty input fails with [`AuthError::MissingToken`] without contacting
  /// the provider.
  pub async fn verify(&self, raw: &str) -> Result<IdentityClaim, AuthError> {
    let token = bearer_token(raw).ok_or(AuthError::MissingToken)?;
    self
      .provider
      .verify_token(token)
      .await
      .map_err(AuthError::InvalidToken)
  }
}
