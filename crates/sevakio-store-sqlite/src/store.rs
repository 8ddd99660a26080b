//! [`SqliteStore`] — the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{ErrorCode, OptionalExtension as _, ffi};

use sevakio_core::{
  profile::{NewProfile, ProfileRecord},
  store::{InsertError, ProfileStore},
};

use crate::{
  Error, Result,
  encode::{RawProfile, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sevakio profile store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection, flushing outstanding work.
  ///
  /// Other clones of this store become unusable afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Whether `err` is SQLite rejecting a row for a duplicate key.
fn is_duplicate_key(err: &rusqlite::Error) -> bool {
  match err {
    rusqlite::Error::SqliteFailure(e, _) => {
      e.code == ErrorCode::ConstraintViolation
        && matches!(
          e.extended_code,
          ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
    _ => false,
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn insert_unique(
    &self,
    profile: NewProfile,
  ) -> Result<ProfileRecord, InsertError<Error>> {
    let record = ProfileRecord::from_new(profile, Utc::now());

    let subject_id   = record.subject_id.clone();
    let email        = record.email.clone();
    let full_name    = record.full_name.clone();
    let phone_number = record.phone_number.clone();
    let created_at   = encode_dt(record.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO profiles (
             subject_id, email, full_name, phone_number, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![subject_id, email, full_name, phone_number, created_at],
        );
        match res {
          Ok(_) => Ok(true),
          Err(e) if is_duplicate_key(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await
      .map_err(|e| InsertError::Store(Error::Database(e)))?;

    if !inserted {
      tracing::debug!(subject_id = %record.subject_id, "profile insert hit primary key");
      return Err(InsertError::DuplicateKey(record.subject_id));
    }
    Ok(record)
  }

  async fn get_profile(&self, subject_id: String) -> Result<Option<ProfileRecord>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM profiles WHERE subject_id = ?1",
          RawProfile::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![subject_id], RawProfile::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn count_profiles(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count.max(0) as u64)
  }
}
