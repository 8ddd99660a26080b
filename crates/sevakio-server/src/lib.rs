//! HTTP surface of the Sevakio registration service.
//!
//! Exposes an axum [`Router`] over any [`ProfileStore`] and
//! [`IdentityProvider`]. Both are constructed by the caller and injected
//! through [`AppState`].

pub mod auth;
pub mod error;
pub mod profiles;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use sevakio_core::{
  provider::IdentityProvider, register::Registrar, store::ProfileStore,
  verify::TokenVerifier,
};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SEVAKIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:              String,
  #[serde(default = "default_port")]
  pub port:              u16,
  pub store_path:        PathBuf,
  pub provider_api_key:  String,
  #[serde(default = "default_provider_base_url")]
  pub provider_base_url: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 5000 }

fn default_provider_base_url() -> String {
  sevakio_identity::DEFAULT_BASE_URL.to_string()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, P> {
  pub registrar: Registrar<S>,
  pub verifier:  TokenVerifier<P>,
}

impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      registrar: self.registrar.clone(),
      verifier:  self.verifier.clone(),
    }
  }
}

impl<S: ProfileStore, P: IdentityProvider> AppState<S, P> {
  pub fn new(store: Arc<S>, provider: Arc<P>) -> Self {
    Self {
      registrar: Registrar::new(store),
      verifier:  TokenVerifier::new(provider),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the service router.
pub fn router<S, P>(state: AppState<S, P>) -> Router
where
  S: ProfileStore + 'static,
  P: IdentityProvider + 'static,
{
  Router::new()
    .route("/profiles",         post(profiles::create::<S, P>))
    .route("/api/users",        get(profiles::index))
    .route("/api/users/create", post(profiles::create::<S, P>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
