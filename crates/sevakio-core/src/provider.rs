//! Contracts consumed from the external Identity Provider.
//!
//! The provider's own token-signing and credential storage are opaque; only
//! these operations are relied on. Adapters (e.g. `sevakio-identity`) must
//! translate every provider failure into a [`ProviderError`].

use std::future::Future;

use crate::{claim::IdentityClaim, error::ProviderError};

/// Server-side half: turn a raw bearer token into a verified claim.
pub trait IdentityProvider: Send + Sync {
  /// Ask the provider whether `raw` is a live token and whose it is.
  fn verify_token<'a>(
    &'a self,
    raw: &'a str,
  ) -> impl Future<Output = Result<IdentityClaim, ProviderError>> + Send + 'a;
}

/// A signed-in (or freshly created) account together with its ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
  pub subject_id: String,
  pub email:      String,
  id_token:       String,
}

impl Credential {
  pub fn new(
    subject_id: impl Into<String>,
    email: impl Into<String>,
    id_token: impl Into<String>,
  ) -> Self {
    Self {
      subject_id: subject_id.into(),
      email:      email.into(),
      id_token:   id_token.into(),
    }
  }

  /// The bearer token to present to the backend.
  pub fn id_token(&self) -> &str { &self.id_token }
}

/// Client-side half: credential lifecycle operations.
pub trait CredentialProvider: Send + Sync {
  /// Create a password credential for `email`.
  fn create_credential<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Credential, ProviderError>> + Send + 'a;

  /// Authenticate an existing password credential.
  fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Credential, ProviderError>> + Send + 'a;

  /// Whether any sign-in method is already registered for `email`.
  fn email_registered<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, ProviderError>> + Send + 'a;

  /// Attach a display name to the account owning `credential`.
  fn set_display_name<'a>(
    &'a self,
    credential: &'a Credential,
    display_name: &'a str,
  ) -> impl Future<Output = Result<(), ProviderError>> + Send + 'a;

  /// Email a password-reset code to `email`.
  fn send_password_reset<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<(), ProviderError>> + Send + 'a;

  /// Check a reset code and return the email it was issued for.
  fn verify_reset_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<String, ProviderError>> + Send + 'a;

  /// Consume a reset code, setting a new password.
  fn confirm_password_reset<'a>(
    &'a self,
    code: &'a str,
    new_password: &'a str,
  ) -> impl Future<Output = Result<(), ProviderError>> + Send + 'a;
}
