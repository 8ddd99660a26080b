//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `sevakio-store-sqlite`). The
//! registration path depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use thiserror::Error;

use crate::profile::{NewProfile, ProfileRecord};

/// Failure of [`ProfileStore::insert_unique`].
#[derive(Debug, Error)]
pub enum InsertError<E> {
  /// The store's uniqueness constraint on `subject_id` rejected the row.
  #[error("duplicate subject id: {0}")]
  DuplicateKey(String),

  #[error(transparent)]
  Store(E),
}

/// Abstraction over the persistent profile collection.
///
/// The store owns the "one profile per subject" invariant. Implementations
/// must enforce it with a constraint inside the store, so that two
/// concurrent inserts for the same subject cannot both succeed.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `profile` in a single atomic step. Never overwrites; an
  /// existing row for the subject yields [`InsertError::DuplicateKey`].
  /// The `created_at` timestamp is set by the store.
  fn insert_unique(
    &self,
    profile: NewProfile,
  ) -> impl Future<Output = Result<ProfileRecord, InsertError<Self::Error>>> + Send + '_;

  /// Retrieve a profile by subject id. Returns `None` if not found.
  fn get_profile(
    &self,
    subject_id: String,
  ) -> impl Future<Output = Result<Option<ProfileRecord>, Self::Error>> + Send + '_;

  /// Total number of stored profiles.
  fn count_profiles(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
