//! Async HTTP client for the registration backend.

use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sevakio_core::provider::Credential;

use crate::flow::{BackendReply, ProfileBackend, SignupProfile};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProfileBody<'a> {
  subject_id:   &'a str,
  email:        &'a str,
  full_name:    &'a str,
  phone_number: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorBody {
  reason: Option<String>,
}

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ProfileClient {
  client:   Client,
  base_url: String,
}

impl ProfileClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }
}

impl ProfileBackend for ProfileClient {
  /// `POST /profiles` — returns the status, and the `reason` of an error
  /// body, for the flow to interpret.
  fn create_profile<'a>(
    &'a self,
    credential: &'a Credential,
    profile: &'a SignupProfile,
  ) -> impl Future<Output = Result<BackendReply>> + Send + 'a {
    async move {
      let body = CreateProfileBody {
        subject_id:   &credential.subject_id,
        email:        &credential.email,
        full_name:    &profile.full_name,
        phone_number: profile.phone_number.as_deref(),
      };
      let resp = self
        .client
        .post(self.url("/profiles"))
        .bearer_auth(credential.id_token())
        .json(&body)
        .send()
        .await
        .context("POST /profiles failed")?;

      let status = resp.status().as_u16();
      tracing::debug!(status, "backend responded");
      let reason = if resp.status().is_success() {
        None
      } else {
        resp.json::<ErrorBody>().await.ok().and_then(|b| b.reason)
      };
      Ok(BackendReply { status, reason })
    }
  }
}
