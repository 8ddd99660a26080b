//! Identity Provider adapter speaking the Identity Toolkit REST protocol.
//!
//! [`IdentityToolkit`] implements both halves of the provider contract:
//! token verification for the server and credential operations for clients.
//! Every failure is reduced to a [`ProviderError`]; raw provider codes are
//! logged and dropped here.

mod codes;
mod token;
mod wire;

pub use codes::map_error_code;
pub use token::token_times;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use sevakio_core::{
  ProviderError,
  claim::IdentityClaim,
  provider::{Credential, CredentialProvider, IdentityProvider},
};

use wire::*;

/// Public endpoint of the hosted provider.
pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Connection settings for the provider.
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
  /// Project API key, sent as the `key` query parameter.
  pub api_key:  String,
  /// Overridable for a local emulator.
  pub base_url: String,
}

impl ToolkitConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_owned() }
  }
}

/// Async client for the provider.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. No timeout
/// or retry is applied; failures surface to the caller as they occur.
#[derive(Clone)]
pub struct IdentityToolkit {
  client: Client,
  config: ToolkitConfig,
}

impl IdentityToolkit {
  pub fn new(config: ToolkitConfig) -> Result<Self, ProviderError> {
    let client = Client::builder().build().map_err(|e| {
      tracing::error!(error = %e, "failed to build identity provider client");
      ProviderError::Network
    })?;
    Ok(Self { client, config })
  }

  fn url(&self, method: &str) -> String {
    format!(
      "{}/accounts:{method}",
      self.config.base_url.trim_end_matches('/')
    )
  }

  /// POST `body` to `accounts:<method>` and decode the reply.
  async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, ProviderError>
  where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
  {
    let resp = self
      .client
      .post(self.url(method))
      .query(&[("key", self.config.api_key.as_str())])
      .json(body)
      .send()
      .await
      .map_err(|e| {
        tracing::warn!(method, error = %e, "identity provider request failed");
        ProviderError::Network
      })?;

    let status = resp.status();
    if status.is_success() {
      return resp.json().await.map_err(|e| {
        tracing::warn!(method, error = %e, "undecodable identity provider reply");
        ProviderError::Unknown
      });
    }

    match resp.json::<ErrorEnvelope>().await {
      Ok(envelope) => Err(map_error_code(&envelope.error.message)),
      Err(_) => {
        tracing::warn!(method, %status, "identity provider error without body");
        Err(ProviderError::Unknown)
      }
    }
  }
}

// ─── Token verification ──────────────────────────────────────────────────────

impl IdentityProvider for IdentityToolkit {
  async fn verify_token<'a>(
    &'a self,
    raw: &'a str,
  ) -> Result<IdentityClaim, ProviderError> {
    let (issued_at, expires_at) =
      token_times(raw).ok_or(ProviderError::InvalidToken)?;

    let reply: LookupResponse =
      self.call("lookup", &LookupRequest { id_token: raw }).await?;
    let user = reply
      .users
      .into_iter()
      .next()
      .ok_or(ProviderError::UserNotFound)?;
    if user.disabled {
      return Err(ProviderError::UserDisabled);
    }

    Ok(IdentityClaim {
      subject_id: user.local_id,
      email: user.email,
      issued_at,
      expires_at,
    })
  }
}

// ─── Credential operations ───────────────────────────────────────────────────

impl CredentialProvider for IdentityToolkit {
  async fn create_credential<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> Result<Credential, ProviderError> {
    let body = PasswordRequest { email, password, return_secure_token: true };
    let reply: AuthResponse = self.call("signUp", &body).await?;
    Ok(Credential::new(reply.local_id, reply.email, reply.id_token))
  }

  async fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> Result<Credential, ProviderError> {
    let body = PasswordRequest { email, password, return_secure_token: true };
    let reply: AuthResponse = self.call("signInWithPassword", &body).await?;
    Ok(Credential::new(reply.local_id, reply.email, reply.id_token))
  }

  async fn email_registered<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<bool, ProviderError> {
    let body = CreateAuthUriRequest {
      identifier:   email,
      continue_uri: "http://localhost",
    };
    let reply: CreateAuthUriResponse = self.call("createAuthUri", &body).await?;
    Ok(reply.registered)
  }

  async fn set_display_name<'a>(
    &'a self,
    credential: &'a Credential,
    display_name: &'a str,
  ) -> Result<(), ProviderError> {
    let body = UpdateRequest {
      id_token: credential.id_token(),
      display_name,
      return_secure_token: false,
    };
    let _: Ignored = self.call("update", &body).await?;
    Ok(())
  }

  async fn send_password_reset<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<(), ProviderError> {
    let body = OobCodeRequest { request_type: "PASSWORD_RESET", email };
    let _: Ignored = self.call("sendOobCode", &body).await?;
    Ok(())
  }

  async fn verify_reset_code<'a>(
    &'a self,
    code: &'a str,
  ) -> Result<String, ProviderError> {
    let body = ResetPasswordRequest { oob_code: code, new_password: None };
    let reply: ResetPasswordResponse = self.call("resetPassword", &body).await?;
    reply.email.ok_or(ProviderError::InvalidActionCode)
  }

  async fn confirm_password_reset<'a>(
    &'a self,
    code: &'a str,
    new_password: &'a str,
  ) -> Result<(), ProviderError> {
    let body = ResetPasswordRequest {
      oob_code:     code,
      new_password: Some(new_password),
    };
    let _: ResetPasswordResponse = self.call("resetPassword", &body).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests;
