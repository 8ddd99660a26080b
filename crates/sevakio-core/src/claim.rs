//! Identity claim — the verified result of presenting a bearer token.

use chrono::{DateTime, Utc};

/// Who a bearer token belongs to, as vouched for by the Identity Provider.
///
/// Claims are transient: they live for a single request and are never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
  /// Stable, opaque identifier issued by the provider.
  pub subject_id: String,
  /// Some providers (phone sign-in, anonymous) issue tokens without one.
  pub email:      Option<String>,
  pub issued_at:  DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}
