//! Conversions between domain types and their SQLite column encodings.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use sevakio_core::profile::ProfileRecord;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `profiles` row exactly as read from SQLite.
pub struct RawProfile {
  pub subject_id:   String,
  pub email:        String,
  pub full_name:    String,
  pub phone_number: Option<String>,
  pub created_at:   String,
}

impl RawProfile {
  pub const COLUMNS: &'static str =
    "subject_id, email, full_name, phone_number, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:   row.get(0)?,
      email:        row.get(1)?,
      full_name:    row.get(2)?,
      phone_number: row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_profile(self) -> Result<ProfileRecord> {
    Ok(ProfileRecord {
      subject_id:   self.subject_id,
      email:        self.email,
      full_name:    self.full_name,
      phone_number: self.phone_number,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
