//! Serialization helpers for `OffsetDateTime` fields in API responses.
//!
//! Timestamps leave the service as RFC 3339 strings, e.g.
//! `2024-05-01T12:30:00.123456Z`.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Serializes an `OffsetDateTime` as an RFC 3339 string.
///
/// # Example
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Timestamp {
///     #[serde(serialize_with = "serialize_offset_date_time")]
///     created_at: OffsetDateTime,
/// }
/// ```
pub fn serialize_offset_date_time<S>(
    date_time: &OffsetDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(
        &date_time
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?,
    )
}
