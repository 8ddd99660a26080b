//! Request and response bodies of the Identity Toolkit REST protocol.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
  pub id_token: &'a str,
}

#[derive(Deserialize)]
pub struct LookupResponse {
  #[serde(default)]
  pub users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupUser {
  pub local_id: String,
  #[serde(default)]
  pub email:    Option<String>,
  #[serde(default)]
  pub disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
  pub email:               &'a str,
  pub password:            &'a str,
  pub return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
  pub local_id: String,
  pub email:    String,
  pub id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUriRequest<'a> {
  pub identifier:   &'a str,
  pub continue_uri: &'a str,
}

#[derive(Deserialize)]
pub struct CreateAuthUriResponse {
  #[serde(default)]
  pub registered: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest<'a> {
  pub id_token:            &'a str,
  pub display_name:        &'a str,
  pub return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OobCodeRequest<'a> {
  pub request_type: &'static str,
  pub email:        &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
  pub oob_code:     &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub new_password: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct ResetPasswordResponse {
  #[serde(default)]
  pub email: Option<String>,
}

/// Anything whose body we don't inspect.
#[derive(Deserialize)]
pub struct Ignored {}

#[derive(Deserialize)]
pub struct ErrorEnvelope {
  pub error: ErrorBody,
}

#[derive(Deserialize)]
pub struct ErrorBody {
  #[serde(default)]
  pub message: String,
}
