use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use anyhow::anyhow;

use super::*;

// ─── Fakes ────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeProvider {
  registered:         Vec<&'static str>,
  precheck_fails:     bool,
  create_error:       Option<ProviderError>,
  display_name_fails: bool,
  sign_in_fails:      bool,
  calls:              Mutex<Vec<&'static str>>,
}

impl FakeProvider {
  fn record(&self, op: &'static str) { self.calls.lock().unwrap().push(op); }

  fn calls(&self) -> Vec<&'static str> { self.calls.lock().unwrap().clone() }
}

impl CredentialProvider for FakeProvider {
  async fn create_credential<'a>(
    &'a self,
    email: &'a str,
    _password: &'a str,
  ) -> Result<Credential, ProviderError> {
    self.record("create_credential");
    match self.create_error {
      Some(e) => Err(e),
      None => Ok(Credential::new("new-uid", email, "id-token")),
    }
  }

  async fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> Result<Credential, ProviderError> {
    self.record("sign_in");
    if self.sign_in_fails || password != "secret1" {
      return Err(ProviderError::InvalidCredential);
    }
    Ok(Credential::new("u1", email, "login-token"))
  }

  async fn email_registered<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<bool, ProviderError> {
    self.record("email_registered");
    if self.precheck_fails {
      return Err(ProviderError::Network);
    }
    Ok(self.registered.iter().any(|r| *r == email))
  }

  async fn set_display_name<'a>(
    &'a self,
    _credential: &'a Credential,
    _display_name: &'a str,
  ) -> Result<(), ProviderError> {
    self.record("set_display_name");
    if self.display_name_fails {
      Err(ProviderError::TokenExpired)
    } else {
      Ok(())
    }
  }

  async fn send_password_reset<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<(), ProviderError> {
    self.record("send_password_reset");
    if email == "a@x.com" { Ok(()) } else { Err(ProviderError::UserNotFound) }
  }

  async fn verify_reset_code<'a>(
    &'a self,
    code: &'a str,
  ) -> Result<String, ProviderError> {
    self.record("verify_reset_code");
    if code == "good-code" {
      Ok("a@x.com".to_owned())
    } else {
      Err(ProviderError::InvalidActionCode)
    }
  }

  async fn confirm_password_reset<'a>(
    &'a self,
    _code: &'a str,
    _new_password: &'a str,
  ) -> Result<(), ProviderError> {
    self.record("confirm_password_reset");
    Ok(())
  }
}

/// Replies with a fixed status, or a transport error when `status` is `None`.
struct FakeBackend {
  status:     Option<u16>,
  reason:     Option<&'static str>,
  calls:      AtomicUsize,
  last_token: Mutex<Option<String>>,
}

fn backend(status: Option<u16>) -> FakeBackend {
  FakeBackend {
    status,
    reason: None,
    calls: AtomicUsize::new(0),
    last_token: Mutex::new(None),
  }
}

impl ProfileBackend for FakeBackend {
  async fn create_profile<'a>(
    &'a self,
    credential: &'a Credential,
    _profile: &'a SignupProfile,
  ) -> anyhow::Result<BackendReply> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    *self.last_token.lock().unwrap() = Some(credential.id_token().to_owned());
    let status = self.status.ok_or_else(|| anyhow!("connection refused"))?;
    Ok(BackendReply { status, reason: self.reason.map(Into::into) })
  }
}

fn form() -> SignupForm {
  SignupForm {
    full_name:        "Asha Rao".into(),
    email:            "asha@example.com".into(),
    phone:            "9876543210".into(),
    password:         "secret1".into(),
    confirm_password: "secret1".into(),
  }
}

fn error_of(state: &FlowState) -> &FlowError {
  match state {
    FlowState::Error(e) => e,
    other => panic!("expected error state, got {other:?}"),
  }
}

// ─── Outcome table ────────────────────────────────────────────────────────────

#[test]
fn statuses_classify() {
  let s = BackendReply::from_status;
  assert_eq!(classify(&s(201)), Outcome::Success);
  assert_eq!(classify(&s(409)), Outcome::AlreadyExists);
  assert_eq!(classify(&s(401)), Outcome::AuthFailed);
  assert_eq!(classify(&s(500)), Outcome::TransientError);
  assert_eq!(classify(&s(400)), Outcome::Unexpected(400));

  let invalid = BackendReply { status: 401, reason: Some("invalid_token".into()) };
  assert_eq!(classify(&invalid), Outcome::AuthFailed);
  let outage =
    BackendReply { status: 401, reason: Some("provider_unavailable".into()) };
  assert_eq!(classify(&outage), Outcome::ProviderUnavailable);
}

// ─── Sign up ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_up_success_presents_token_to_backend() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(201)));
  assert_eq!(c.state(), &FlowState::Idle);

  let state = c.sign_up(&form()).await.clone();
  assert!(matches!(state, FlowState::Success(_)));
  assert_eq!(c.session().unwrap().subject_id, "new-uid");
  assert_eq!(
    c.backend.last_token.lock().unwrap().as_deref(),
    Some("id-token")
  );
  assert_eq!(
    c.provider.calls(),
    ["email_registered", "create_credential", "set_display_name"]
  );
}

#[tokio::test]
async fn invalid_form_makes_no_calls() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(201)));
  let mut f = form();
  f.confirm_password = "different".into();

  let err = error_of(c.sign_up(&f).await).clone();
  assert_eq!(err.kind, ErrorKind::Validation);
  assert_eq!(err.message, "Passwords do not match. Please try again.");
  assert!(c.provider.calls().is_empty());
  assert_eq!(c.backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registered_email_redirects_before_creating() {
  let provider = FakeProvider {
    registered: vec!["asha@example.com"],
    ..Default::default()
  };
  let mut c = Controller::new(provider, backend(Some(201)));

  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::AlreadyExists);
  assert!(err.redirect_to_login());
  assert_eq!(c.provider.calls(), ["email_registered"]);
}

#[tokio::test]
async fn failed_precheck_does_not_block_signup() {
  let provider = FakeProvider { precheck_fails: true, ..Default::default() };
  let mut c = Controller::new(provider, backend(Some(201)));
  assert!(matches!(c.sign_up(&form()).await, FlowState::Success(_)));
}

#[tokio::test]
async fn provider_email_in_use_redirects() {
  let provider = FakeProvider {
    create_error: Some(ProviderError::EmailInUse),
    ..Default::default()
  };
  let mut c = Controller::new(provider, backend(Some(201)));

  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::Provider(ProviderError::EmailInUse));
  assert!(err.redirect_to_login());
  assert_eq!(c.backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn weak_password_is_reported_without_redirect() {
  let provider = FakeProvider {
    create_error: Some(ProviderError::WeakPassword),
    ..Default::default()
  };
  let mut c = Controller::new(provider, backend(Some(201)));

  let err = error_of(c.sign_up(&form()).await).clone();
  assert!(!err.redirect_to_login());
  assert!(err.message.starts_with("Password is too weak"));
}

#[tokio::test]
async fn display_name_failure_is_not_fatal() {
  let provider = FakeProvider { display_name_fails: true, ..Default::default() };
  let mut c = Controller::new(provider, backend(Some(201)));
  assert!(matches!(c.sign_up(&form()).await, FlowState::Success(_)));
}

#[tokio::test]
async fn backend_conflict_redirects_to_login() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(409)));
  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::AlreadyExists);
  assert!(err.redirect_to_login());
  assert!(c.session().is_none());
}

#[tokio::test]
async fn backend_auth_failure_drops_session() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(401)));
  c.log_in("a@x.com", "secret1").await;
  assert!(c.session().is_some());

  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::AuthFailed);
  assert!(err.redirect_to_login());
  assert!(c.session().is_none());
}

#[tokio::test]
async fn backend_server_error_is_retryable() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(500)));
  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::Transient);
  assert!(err.retryable());
  assert!(!err.redirect_to_login());
}

#[tokio::test]
async fn provider_outage_keeps_session_and_is_retryable() {
  let mut outage = backend(Some(401));
  outage.reason = Some("provider_unavailable");
  let mut c = Controller::new(FakeProvider::default(), outage);

  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::Transient);
  assert!(err.retryable());
  assert!(!err.redirect_to_login());
  assert!(c.session().is_some());
}

#[tokio::test]
async fn unexpected_status_and_transport_failure_are_backend_errors() {
  let mut c = Controller::new(FakeProvider::default(), backend(Some(400)));
  assert_eq!(error_of(c.sign_up(&form()).await).kind, ErrorKind::Backend);

  let mut c = Controller::new(FakeProvider::default(), backend(None));
  let err = error_of(c.sign_up(&form()).await).clone();
  assert_eq!(err.kind, ErrorKind::Backend);
  assert_eq!(err.message, "Failed to save user to backend");
}

// ─── Log in ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn log_in_maps_provider_errors() {
  let mut c = Controller::new(FakeProvider::default(), backend(None));
  let err = error_of(c.log_in("a@x.com", "wrong").await).clone();
  assert_eq!(err.kind, ErrorKind::Provider(ProviderError::InvalidCredential));
  assert_eq!(err.message, "Invalid email or password.");

  assert!(matches!(
    c.log_in("a@x.com", "secret1").await,
    FlowState::Success(_)
  ));
}

// ─── Password reset ───────────────────────────────────────────────────────────

#[tokio::test]
async fn forgot_password_requires_email() {
  let mut c = Controller::new(FakeProvider::default(), backend(None));
  assert_eq!(
    error_of(c.forgot_password("  ").await).kind,
    ErrorKind::Validation
  );
  assert!(c.provider.calls().is_empty());

  assert!(matches!(
    c.forgot_password("a@x.com").await,
    FlowState::Success(_)
  ));
  let err = error_of(c.forgot_password("ghost@x.com").await).clone();
  assert_eq!(err.message, "No account found with this email.");
}

fn reset(code: &str) -> ResetForm {
  ResetForm {
    code:             code.into(),
    new_password:     "secret1".into(),
    confirm_password: "secret1".into(),
  }
}

#[tokio::test]
async fn reset_password_signs_in_afterwards() {
  let mut c = Controller::new(FakeProvider::default(), backend(None));
  assert!(matches!(
    c.reset_password(&reset("good-code")).await,
    FlowState::Success(_)
  ));
  assert_eq!(c.session().unwrap().email, "a@x.com");
  assert_eq!(
    c.provider.calls(),
    ["verify_reset_code", "confirm_password_reset", "sign_in"]
  );
}

#[tokio::test]
async fn reset_password_succeeds_even_if_auto_sign_in_fails() {
  let provider = FakeProvider { sign_in_fails: true, ..Default::default() };
  let mut c = Controller::new(provider, backend(None));
  assert!(matches!(
    c.reset_password(&reset("good-code")).await,
    FlowState::Success(_)
  ));
  assert!(c.session().is_none());
}

#[tokio::test]
async fn reset_password_with_stale_code() {
  let mut c = Controller::new(FakeProvider::default(), backend(None));
  let err = error_of(c.reset_password(&reset("stale")).await).clone();
  assert_eq!(err.kind, ErrorKind::Provider(ProviderError::InvalidActionCode));
  assert_eq!(
    err.message,
    "Invalid or expired code. Please request a new password reset."
  );
}
