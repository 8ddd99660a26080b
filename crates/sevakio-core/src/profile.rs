//! Profile records — one persisted document per registered identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied registration fields. Identity fields come from the
/// verified claim instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
  pub full_name:    String,
  #[serde(default)]
  pub phone_number: Option<String>,
}

/// A validated profile ready for insertion. `created_at` is assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
  pub subject_id:   String,
  pub email:        String,
  pub full_name:    String,
  pub phone_number: Option<String>,
}

/// A persisted profile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
  pub subject_id:   String,
  pub email:        String,
  pub full_name:    String,
  pub phone_number: Option<String>,
  pub created_at:   DateTime<Utc>,
}

impl ProfileRecord {
  /// Stamp a [`NewProfile`] with its creation time.
  pub fn from_new(profile: NewProfile, created_at: DateTime<Utc>) -> Self {
    Self {
      subject_id: profile.subject_id,
      email: profile.email,
      full_name: profile.full_name,
      phone_number: profile.phone_number,
      created_at,
    }
  }
}
