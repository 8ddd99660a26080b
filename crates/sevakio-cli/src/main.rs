//! `sevakio` — command-line sign-up and sign-in for Sevakio.
//!
//! # Usage
//!
//! ```
//! sevakio --api-key KEY signup --full-name "Asha Rao" --email asha@example.com --phone 9876543210
//! sevakio --config ~/.config/sevakio/config.toml login --email asha@example.com
//! sevakio forgot-password --email asha@example.com
//! sevakio reset-password --code <code-from-email>
//! ```
//!
//! Passwords are always read from the terminal with echo disabled; there is
//! no flag for them.

mod client;
mod flow;
mod form;
mod messages;

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::ProfileClient;
use flow::{Controller, FlowState};
use form::{ResetForm, SignupForm};
use serde::Deserialize;
use sevakio_identity::{DEFAULT_BASE_URL, IdentityToolkit, ToolkitConfig};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sevakio", about = "Sign up and sign in to Sevakio")]
struct Args {
  /// Path to a TOML config file (api_url, api_key, provider_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the Sevakio backend (default: http://localhost:5000).
  #[arg(long, env = "SEVAKIO_API_URL")]
  api_url: Option<String>,

  /// Identity provider API key.
  #[arg(long, env = "SEVAKIO_API_KEY")]
  api_key: Option<String>,

  /// Identity provider base URL, e.g. for a local emulator.
  #[arg(long, env = "SEVAKIO_PROVIDER_URL")]
  provider_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create an account and register its profile.
  Signup {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email:     String,
    #[arg(long)]
    phone:     String,
  },
  /// Sign in with email and password.
  Login {
    #[arg(long)]
    email: String,
  },
  /// Email a password-reset code.
  ForgotPassword {
    #[arg(long)]
    email: String,
  },
  /// Set a new password using a reset code.
  ResetPassword {
    #[arg(long)]
    code: String,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  api_url:      String,
  #[serde(default)]
  api_key:      String,
  #[serde(default)]
  provider_url: String,
}

fn non_empty(s: String) -> Option<String> { (!s.is_empty()).then_some(s) }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_url = args
    .api_url
    .or_else(|| non_empty(file_cfg.api_url))
    .unwrap_or_else(|| "http://localhost:5000".to_string());
  let Some(api_key) = args.api_key.or_else(|| non_empty(file_cfg.api_key)) else {
    bail!("an identity provider API key is required (--api-key or SEVAKIO_API_KEY)");
  };
  let provider_url = args
    .provider_url
    .or_else(|| non_empty(file_cfg.provider_url))
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

  let provider = IdentityToolkit::new(ToolkitConfig { api_key, base_url: provider_url })
    .context("failed to build identity provider client")?;
  let backend = ProfileClient::new(api_url)?;
  let mut controller = Controller::new(provider, backend);

  let state = match args.command {
    Command::Signup { full_name, email, phone } => {
      let password = prompt_secret("Password: ")?;
      let confirm_password = prompt_secret("Confirm password: ")?;
      let form = SignupForm { full_name, email, phone, password, confirm_password };
      controller.sign_up(&form).await
    }
    Command::Login { email } => {
      let password = prompt_secret("Password: ")?;
      controller.log_in(&email, &password).await
    }
    Command::ForgotPassword { email } => controller.forgot_password(&email).await,
    Command::ResetPassword { code } => {
      let new_password = prompt_secret("New password: ")?;
      let confirm_password = prompt_secret("Confirm password: ")?;
      let form = ResetForm { code, new_password, confirm_password };
      controller.reset_password(&form).await
    }
  };

  match state.clone() {
    FlowState::Success(notice) => {
      println!("{notice}");
      if let Some(session) = controller.session() {
        println!("Signed in as {}", session.email);
      }
      Ok(())
    }
    FlowState::Error(e) => {
      if e.redirect_to_login() {
        eprintln!("hint: run `sevakio login --email <email>` to sign in");
      } else if e.retryable() {
        eprintln!("hint: this may be temporary; try again later");
      }
      bail!("{}", e.message)
    }
    FlowState::Idle | FlowState::Submitting => bail!("flow did not complete"),
  }
}

/// Read a secret from the terminal after printing `label`, without echo.
fn prompt_secret(label: &str) -> Result<String> {
  rpassword::prompt_password(label).context("failed to read from terminal")
}
