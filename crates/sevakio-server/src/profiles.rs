//! Handlers for profile registration.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Bearer token + `{subjectId, email, fullName, phoneNumber?}` |
//! | `POST` | `/api/users/create` | Same handler, kept for existing clients |
//! | `GET`  | `/api/users` | Liveness probe |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sevakio_core::{
  RegisterError, ValidationError, profile::ProfileFields,
  provider::IdentityProvider, store::ProfileStore,
};

use crate::{AppState, auth::Verified, error::ApiError};

// ─── Create ───────────────────────────────────────────────────────────────────

/// Registration body. Identity fields are echoed by the client and checked
/// against the token; the token's values are what get stored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  #[serde(alias = "uid")]
  pub subject_id:   Option<String>,
  pub email:        Option<String>,
  pub full_name:    Option<String>,
  pub phone_number: Option<String>,
}

fn required<'a>(
  value: &'a Option<String>,
  field: &'static str,
) -> Result<&'a str, ValidationError> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .ok_or(ValidationError::missing(field))
}

/// `POST /profiles`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  Verified(claim): Verified,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore + 'static,
  P: IdentityProvider + 'static,
{
  let Json(body) = body.map_err(|e| {
    tracing::debug!(error = %e, "unreadable registration body");
    ValidationError::missing("body")
  })?;

  let subject_id = required(&body.subject_id, "subjectId")?;
  required(&body.email, "email")?;
  required(&body.full_name, "fullName")?;

  if subject_id != claim.subject_id {
    tracing::warn!(
      token_subject = %claim.subject_id,
      body_subject = %subject_id,
      "registration for a subject other than the token's"
    );
    return Err(ApiError::SubjectMismatch);
  }

  let fields = ProfileFields {
    full_name:    body.full_name.unwrap_or_default(),
    phone_number: body.phone_number,
  };

  match state.registrar.register(&claim, fields).await {
    Ok(user) => {
      tracing::info!(subject_id = %user.subject_id, "profile created");
      Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user })),
      ))
    }
    Err(RegisterError::AlreadyExists(id)) => {
      tracing::warn!(subject_id = %id, "profile already exists");
      Err(ApiError::AlreadyExists(id))
    }
    Err(e @ RegisterError::StoreUnavailable(_)) => {
      tracing::error!(error = %e, "profile store failure");
      Err(e.into())
    }
    Err(e) => Err(e.into()),
  }
}

// ─── Probe ────────────────────────────────────────────────────────────────────

/// `GET /api/users`
pub async fn index() -> impl IntoResponse {
  Json(json!({ "message": "Users route" }))
}
