//! Registration Reconciler — create-or-reject a profile for a verified
//! identity.
//!
//! The existence check and the insert are one operation: the reconciler
//! never looks a profile up before writing it. A duplicate is detected only
//! by the store's uniqueness constraint, which is what makes concurrent
//! registrations for the same subject resolve to exactly one winner.

use std::sync::Arc;

use crate::{
  Result,
  claim::IdentityClaim,
  error::{RegisterError, ValidationError},
  profile::{NewProfile, ProfileFields, ProfileRecord},
  store::{InsertError, ProfileStore},
};

/// Build the row to insert, rejecting missing required fields.
///
/// The claim is authoritative for `subject_id` and `email`. The caller's
/// `full_name` and `phone_number` are stored exactly as given; a name that
/// is only whitespace counts as missing.
pub fn prepare(
  claim: &IdentityClaim,
  fields: ProfileFields,
) -> std::result::Result<NewProfile, ValidationError> {
  let subject_id = claim.subject_id.trim();
  if subject_id.is_empty() {
    return Err(ValidationError::missing("subjectId"));
  }

  let email = claim
    .email
    .as_deref()
    .map(str::trim)
    .filter(|e| !e.is_empty())
    .ok_or(ValidationError::missing("email"))?;

  let ProfileFields { full_name, phone_number } = fields;
  if full_name.trim().is_empty() {
    return Err(ValidationError::missing("fullName"));
  }

  Ok(NewProfile {
    subject_id: subject_id.to_owned(),
    email: email.to_owned(),
    full_name,
    phone_number,
  })
}

/// Creates profiles through an injected [`ProfileStore`].
///
/// Stateless between calls and holds no lock across the store round-trip.
pub struct Registrar<S> {
  store: Arc<S>,
}

impl<S> Clone for Registrar<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ProfileStore> Registrar<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Register a profile for `claim`.
  ///
  /// Fails with [`RegisterError::Validation`] before touching the store,
  /// [`RegisterError::AlreadyExists`] if the subject already has a profile
  /// (which is left untouched), or [`RegisterError::StoreUnavailable`].
  pub async fn register(
    &self,
    claim: &IdentityClaim,
    fields: ProfileFields,
  ) -> Result<ProfileRecord> {
    let profile = prepare(claim, fields)?;
    self.store.insert_unique(profile).await.map_err(|e| match e {
      InsertError::DuplicateKey(subject_id) => {
        RegisterError::AlreadyExists(subject_id)
      }
      InsertError::Store(e) => RegisterError::StoreUnavailable(Box::new(e)),
    })
  }
}
