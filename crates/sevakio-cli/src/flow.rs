//! Client Flow Controller — drives the provider and the backend and turns
//! their outcomes into a UI state.
//!
//! Each submission runs to completion; there is no cancellation and no
//! timeout beyond whatever the transport imposes.

use std::future::Future;

use sevakio_core::{
  ProviderError,
  provider::{Credential, CredentialProvider},
};

use crate::{
  form::{FormError, ResetForm, SignupForm},
  messages,
};

// ─── Backend boundary ─────────────────────────────────────────────────────────

/// Profile fields sent alongside the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupProfile {
  pub full_name:    String,
  pub phone_number: Option<String>,
}

/// A backend answer: the HTTP status plus the `reason` of a 401 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
  pub status: u16,
  pub reason: Option<String>,
}

impl BackendReply {
  pub fn from_status(status: u16) -> Self { Self { status, reason: None } }
}

/// The registration backend as seen by the client: one reply per attempt,
/// or a transport failure.
pub trait ProfileBackend: Send + Sync {
  fn create_profile<'a>(
    &'a self,
    credential: &'a Credential,
    profile: &'a SignupProfile,
  ) -> impl Future<Output = anyhow::Result<BackendReply>> + Send + 'a;
}

/// What a backend reply means to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Success,
  AlreadyExists,
  AuthFailed,
  /// 401 because the backend could not reach the Identity Provider; the
  /// token itself was never judged.
  ProviderUnavailable,
  TransientError,
  Unexpected(u16),
}

pub fn classify(reply: &BackendReply) -> Outcome {
  match (reply.status, reply.reason.as_deref()) {
    (201, _) => Outcome::Success,
    (409, _) => Outcome::AlreadyExists,
    (401, Some("provider_unavailable")) => Outcome::ProviderUnavailable,
    (401, _) => Outcome::AuthFailed,
    (500, _) => Outcome::TransientError,
    (other, _) => Outcome::Unexpected(other),
  }
}

// ─── State ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  AlreadyExists,
  AuthFailed,
  /// Worth retrying later.
  Transient,
  Provider(ProviderError),
  Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
  pub kind:    ErrorKind,
  pub message: String,
}

impl FlowError {
  fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }

  /// The user should be sent to the login screen.
  pub fn redirect_to_login(&self) -> bool {
    matches!(
      self.kind,
      ErrorKind::AlreadyExists
        | ErrorKind::AuthFailed
        | ErrorKind::Provider(ProviderError::EmailInUse)
    )
  }

  pub fn retryable(&self) -> bool {
    matches!(
      self.kind,
      ErrorKind::Transient | ErrorKind::Provider(ProviderError::Network)
    )
  }
}

impl From<FormError> for FlowError {
  fn from(err: FormError) -> Self {
    Self::new(ErrorKind::Validation, err.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
  Idle,
  Submitting,
  Success(String),
  Error(FlowError),
}

// ─── Controller ───────────────────────────────────────────────────────────────

pub struct Controller<C, B> {
  provider: C,
  backend:  B,
  state:    FlowState,
  session:  Option<Credential>,
}

impl<C: CredentialProvider, B: ProfileBackend> Controller<C, B> {
  pub fn new(provider: C, backend: B) -> Self {
    Self { provider, backend, state: FlowState::Idle, session: None }
  }

  pub fn state(&self) -> &FlowState { &self.state }

  /// The signed-in account, if any.
  pub fn session(&self) -> Option<&Credential> { self.session.as_ref() }

  fn finish(&mut self, result: Result<String, FlowError>) -> &FlowState {
    self.state = match result {
      Ok(notice) => FlowState::Success(notice),
      Err(e) => {
        tracing::debug!(kind = ?e.kind, "flow failed");
        FlowState::Error(e)
      }
    };
    &self.state
  }

  // ── Sign up ─────────────────────────────────────────────────────────────

  pub async fn sign_up(&mut self, form: &SignupForm) -> &FlowState {
    if let Err(e) = form.validate() {
      return self.finish(Err(e.into()));
    }
    self.state = FlowState::Submitting;
    let result = self.run_sign_up(form).await;
    self.finish(result)
  }

  async fn run_sign_up(&mut self, form: &SignupForm) -> Result<String, FlowError> {
    let email = form.email.trim();

    match self.provider.email_registered(email).await {
      Ok(true) => {
        return Err(FlowError::new(
          ErrorKind::AlreadyExists,
          "Email already registered. Please login.",
        ));
      }
      Ok(false) => {}
      Err(e) => tracing::debug!(error = %e, "email pre-check failed; continuing"),
    }

    let credential = self
      .provider
      .create_credential(email, &form.password)
      .await
      .map_err(|e| FlowError::new(ErrorKind::Provider(e), messages::signup(e)))?;

    let full_name = form.full_name.trim();
    if let Err(e) = self.provider.set_display_name(&credential, full_name).await {
      tracing::warn!(error = %e, "could not set display name");
    }

    let profile = SignupProfile {
      full_name:    full_name.to_owned(),
      phone_number: Some(form.phone.trim().to_owned()),
    };
    let reply = match self.backend.create_profile(&credential, &profile).await {
      Ok(reply) => reply,
      Err(e) => {
        tracing::error!(error = %e, "failed to call backend");
        return Err(FlowError::new(
          ErrorKind::Backend,
          "Failed to save user to backend",
        ));
      }
    };

    match classify(&reply) {
      Outcome::Success => {
        self.session = Some(credential);
        Ok("Account created.".to_owned())
      }
      Outcome::AlreadyExists => Err(FlowError::new(
        ErrorKind::AlreadyExists,
        "The email is already registered, please login",
      )),
      Outcome::AuthFailed => {
        self.session = None;
        Err(FlowError::new(
          ErrorKind::AuthFailed,
          "Authentication failed. Please login again.",
        ))
      }
      Outcome::ProviderUnavailable => {
        self.session = Some(credential);
        Err(FlowError::new(
          ErrorKind::Transient,
          "Sign-in service is unreachable. Please try again later.",
        ))
      }
      Outcome::TransientError => Err(FlowError::new(
        ErrorKind::Transient,
        "Server error. Please try again later.",
      )),
      Outcome::Unexpected(code) => {
        tracing::error!(status = code, "unexpected backend status");
        Err(FlowError::new(
          ErrorKind::Backend,
          "Failed to save user to backend",
        ))
      }
    }
  }

  // ── Log in ──────────────────────────────────────────────────────────────

  pub async fn log_in(&mut self, email: &str, password: &str) -> &FlowState {
    self.state = FlowState::Submitting;
    let result = match self.provider.sign_in(email.trim(), password).await {
      Ok(credential) => {
        self.session = Some(credential);
        Ok("Signed in.".to_owned())
      }
      Err(e) => Err(FlowError::new(ErrorKind::Provider(e), messages::login(e))),
    };
    self.finish(result)
  }

  // ── Password reset ──────────────────────────────────────────────────────

  pub async fn forgot_password(&mut self, email: &str) -> &FlowState {
    let email = email.trim();
    if email.is_empty() {
      return self.finish(Err(FormError::MissingEmail.into()));
    }
    self.state = FlowState::Submitting;
    let result = match self.provider.send_password_reset(email).await {
      Ok(()) => Ok(
        "A verification code has been sent to your email. Check your inbox and spam folder."
          .to_owned(),
      ),
      Err(e) => Err(FlowError::new(
        ErrorKind::Provider(e),
        messages::reset_request(e),
      )),
    };
    self.finish(result)
  }

  pub async fn reset_password(&mut self, form: &ResetForm) -> &FlowState {
    if let Err(e) = form.validate() {
      return self.finish(Err(e.into()));
    }
    self.state = FlowState::Submitting;
    let result = self.run_reset(form).await;
    self.finish(result)
  }

  async fn run_reset(&mut self, form: &ResetForm) -> Result<String, FlowError> {
    let code = form.code.trim();
    let to_flow =
      |e: ProviderError| FlowError::new(ErrorKind::Provider(e), messages::reset_confirm(e));

    let email = self.provider.verify_reset_code(code).await.map_err(to_flow)?;
    self
      .provider
      .confirm_password_reset(code, &form.new_password)
      .await
      .map_err(to_flow)?;

    // Best effort: a failed auto sign-in still leaves the password changed.
    match self.provider.sign_in(&email, &form.new_password).await {
      Ok(credential) => self.session = Some(credential),
      Err(e) => tracing::warn!(error = %e, "auto sign-in after reset failed"),
    }
    Ok("Password updated successfully!".to_owned())
  }
}

#[cfg(test)]
mod tests;
