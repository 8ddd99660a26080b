//! Adapter tests against a throwaway HTTP server imitating the provider.

use std::{collections::HashMap, sync::Arc};

use axum::{
  Json, Router,
  extract::{Query, State},
  http::{StatusCode, Uri},
  response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use sevakio_core::{
  ProviderError,
  provider::{Credential, CredentialProvider, IdentityProvider},
};
use tokio::net::TcpListener;

use crate::{IdentityToolkit, ToolkitConfig, token::fake_jwt};

const API_KEY: &str = "test-key";

fn provider_error(message: &str) -> Response {
  (
    StatusCode::BAD_REQUEST,
    Json(json!({ "error": { "code": 400, "message": message } })),
  )
    .into_response()
}

/// Minimal stand-in for the provider. `good` is the only live ID token.
async fn fake_provider(
  State(good): State<Arc<String>>,
  uri: Uri,
  Query(query): Query<HashMap<String, String>>,
  Json(body): Json<Value>,
) -> Response {
  if query.get("key").map(String::as_str) != Some(API_KEY) {
    return provider_error("API_KEY_INVALID");
  }
  let field = |name: &str| body[name].as_str().unwrap_or_default().to_owned();

  match uri.path() {
    "/v1/accounts:lookup" => {
      if field("idToken") == *good {
        Json(json!({ "users": [{ "localId": "u1", "email": "a@x.com" }] }))
          .into_response()
      } else {
        provider_error("INVALID_ID_TOKEN")
      }
    }
    "/v1/accounts:signUp" => match (field("email").as_str(), field("password")) {
      ("taken@x.com", _) => provider_error("EMAIL_EXISTS"),
      (_, p) if p.len() < 6 => {
        provider_error("WEAK_PASSWORD : Password should be at least 6 characters")
      }
      (email, _) => Json(json!({
        "localId": "new-uid",
        "email": email,
        "idToken": "new-token",
        "refreshToken": "r",
        "expiresIn": "3600",
      }))
      .into_response(),
    },
    "/v1/accounts:signInWithPassword" => {
      if field("password") == "secret1" {
        Json(json!({ "localId": "u1", "email": field("email"), "idToken": "t" }))
          .into_response()
      } else {
        provider_error("INVALID_LOGIN_CREDENTIALS")
      }
    }
    "/v1/accounts:createAuthUri" => {
      Json(json!({ "registered": field("identifier") == "taken@x.com" }))
        .into_response()
    }
    "/v1/accounts:update" => Json(json!({ "localId": "u1" })).into_response(),
    "/v1/accounts:sendOobCode" => {
      if field("email") == "a@x.com" {
        Json(json!({ "email": "a@x.com" })).into_response()
      } else {
        provider_error("EMAIL_NOT_FOUND")
      }
    }
    "/v1/accounts:resetPassword" => {
      if field("oobCode") == "good-code" {
        Json(json!({ "email": "a@x.com", "requestType": "PASSWORD_RESET" }))
          .into_response()
      } else {
        provider_error("EXPIRED_OOB_CODE")
      }
    }
    _ => StatusCode::NOT_FOUND.into_response(),
  }
}

async fn spawn_provider(good_token: &str) -> IdentityToolkit {
  let app = Router::new()
    .fallback(fake_provider)
    .with_state(Arc::new(good_token.to_owned()));
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

  IdentityToolkit::new(ToolkitConfig {
    api_key:  API_KEY.into(),
    base_url: format!("http://{addr}/v1"),
  })
  .unwrap()
}

// ── Verification ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn live_token_verifies_to_claim() {
  let token = fake_jwt(1_700_000_000, 1_700_003_600);
  let idp = spawn_provider(&token).await;

  let claim = idp.verify_token(&token).await.unwrap();
  assert_eq!(claim.subject_id, "u1");
  assert_eq!(claim.email.as_deref(), Some("a@x.com"));
  assert_eq!(claim.issued_at.timestamp(), 1_700_000_000);
  assert_eq!(claim.expires_at.timestamp(), 1_700_003_600);
}

#[tokio::test]
async fn rejected_token_maps_to_invalid_token() {
  let idp = spawn_provider(&fake_jwt(1, 2)).await;
  let other = fake_jwt(3, 4);
  assert_eq!(
    idp.verify_token(&other).await,
    Err(ProviderError::InvalidToken)
  );
}

#[tokio::test]
async fn non_jwt_is_invalid_without_lookup() {
  let idp = spawn_provider("irrelevant").await;
  assert_eq!(
    idp.verify_token("not-a-jwt").await,
    Err(ProviderError::InvalidToken)
  );
}

#[tokio::test]
async fn unreachable_provider_is_network_error() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let idp = IdentityToolkit::new(ToolkitConfig {
    api_key:  API_KEY.into(),
    base_url: format!("http://{addr}/v1"),
  })
  .unwrap();
  assert_eq!(
    idp.verify_token(&fake_jwt(1, 2)).await,
    Err(ProviderError::Network)
  );
}

// ── Credentials ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_credential_returns_token() {
  let idp = spawn_provider("").await;
  let cred = idp.create_credential("new@x.com", "secret1").await.unwrap();
  assert_eq!(cred.subject_id, "new-uid");
  assert_eq!(cred.email, "new@x.com");
  assert_eq!(cred.id_token(), "new-token");
}

#[tokio::test]
async fn create_credential_error_codes() {
  let idp = spawn_provider("").await;
  assert_eq!(
    idp.create_credential("taken@x.com", "secret1").await,
    Err(ProviderError::EmailInUse)
  );
  assert_eq!(
    idp.create_credential("new@x.com", "123").await,
    Err(ProviderError::WeakPassword)
  );
}

#[tokio::test]
async fn sign_in_rejects_bad_password() {
  let idp = spawn_provider("").await;
  assert!(idp.sign_in("a@x.com", "secret1").await.is_ok());
  assert_eq!(
    idp.sign_in("a@x.com", "nope").await,
    Err(ProviderError::InvalidCredential)
  );
}

#[tokio::test]
async fn email_registered_reports_existing_accounts() {
  let idp = spawn_provider("").await;
  assert!(idp.email_registered("taken@x.com").await.unwrap());
  assert!(!idp.email_registered("free@x.com").await.unwrap());
}

#[tokio::test]
async fn display_name_update_succeeds() {
  let idp = spawn_provider("").await;
  let cred = Credential::new("u1", "a@x.com", "t");
  assert_eq!(idp.set_display_name(&cred, "Alice").await, Ok(()));
}

#[tokio::test]
async fn password_reset_round() {
  let idp = spawn_provider("").await;
  assert_eq!(idp.send_password_reset("a@x.com").await, Ok(()));
  assert_eq!(
    idp.send_password_reset("ghost@x.com").await,
    Err(ProviderError::UserNotFound)
  );

  assert_eq!(idp.verify_reset_code("good-code").await.unwrap(), "a@x.com");
  assert_eq!(
    idp.verify_reset_code("stale").await,
    Err(ProviderError::InvalidActionCode)
  );
  assert_eq!(idp.confirm_password_reset("good-code", "secret2").await, Ok(()));
}

#[tokio::test]
async fn wrong_api_key_is_unknown() {
  let idp = spawn_provider("").await;
  let mut cfg = idp.config.clone();
  cfg.api_key = "wrong".into();
  let idp = IdentityToolkit::new(cfg).unwrap();
  assert_eq!(
    idp.email_registered("a@x.com").await,
    Err(ProviderError::Unknown)
  );
}
