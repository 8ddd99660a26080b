//! Reading the issue/expiry times out of an ID token.
//!
//! ID tokens are JWTs. Their signature is the provider's concern; this only
//! decodes the payload segment to learn `iat` and `exp`.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64URL;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct Times {
  iat: i64,
  exp: i64,
}

/// `(issued_at, expires_at)` from a JWT, or `None` if it is not one.
pub fn token_times(token: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
  let mut segments = token.split('.');
  let (_header, payload, _sig) =
    (segments.next()?, segments.next()?, segments.next()?);
  if segments.next().is_some() {
    return None;
  }

  let bytes = B64URL.decode(payload.trim_end_matches('=')).ok()?;
  let times: Times = serde_json::from_slice(&bytes).ok()?;
  Some((
    Utc.timestamp_opt(times.iat, 0).single()?,
    Utc.timestamp_opt(times.exp, 0).single()?,
  ))
}

#[cfg(test)]
pub(crate) fn fake_jwt(iat: i64, exp: i64) -> String {
  let header = B64URL.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
  let payload = B64URL.encode(format!(r#"{{"sub":"u1","iat":{iat},"exp":{exp}}}"#));
  format!("{header}.{payload}.c2ln")
}
