//! Bearer-token extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use sevakio_core::{
  AuthError, claim::IdentityClaim, provider::IdentityProvider,
  store::ProfileStore,
};

use crate::{AppState, error::ApiError};

/// Present in a handler means the request carried a token the Identity
/// Provider accepted.
pub struct Verified(pub IdentityClaim);

impl<S, P> FromRequestParts<AppState<S, P>> for Verified
where
  S: ProfileStore + 'static,
  P: IdentityProvider + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, P>,
  ) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(axum::http::header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(AuthError::MissingToken)?;

    match state.verifier.verify(raw).await {
      Ok(claim) => Ok(Verified(claim)),
      Err(e) => {
        tracing::warn!(error = %e, "rejected bearer token");
        Err(e.into())
      }
    }
  }
}
