//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// UTC timestamp used for `timeOfSample` on reported properties.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Serialize a [`Timestamp`] as RFC 3339 with millisecond precision and a `Z` suffix.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize_millis<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
