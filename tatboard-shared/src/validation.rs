/// Input parsing helpers shared by every controller
///
/// Cross-entity references (`leader_id`, `project_id`, `assigned_to`) are
/// validated for ObjectId syntax only; existence is deliberately never
/// checked, so dangling references are possible and accepted.
///
/// Dates arrive as strings in request bodies and are accepted in three
/// forms: RFC 3339, `YYYY-MM-DDTHH:MM:SS` (assumed UTC), and a bare
/// `YYYY-MM-DD` (midnight UTC).

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Deserializer};

/// Checks whether a string is a well-formed ObjectId
///
/// # Example
///
/// ```
/// use tatboard_shared::validation::is_valid_object_id;
///
/// assert!(is_valid_object_id("507f1f77bcf86cd799439011"));
/// assert!(!is_valid_object_id("not-an-id"));
/// ```
pub fn is_valid_object_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}

/// Parses a string into an ObjectId, returning `None` when malformed
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Parses a date-like string into a BSON datetime
///
/// Returns `None` for unparseable input; callers map that to a 400 with
/// a field-specific message.
pub fn parse_date(input: &str) -> Option<bson::DateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(input) {
        return Some(bson::DateTime::from_chrono(dt.with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(bson::DateTime::from_chrono(Utc.from_utc_datetime(&naive)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(bson::DateTime::from_chrono(Utc.from_utc_datetime(&midnight)));
    }

    None
}

/// Deserializes a field that distinguishes "absent" from "explicitly null"
///
/// With `#[serde(default, deserialize_with = "deserialize_explicit_null")]`
/// on an `Option<Option<T>>` field, a missing key is `None`, a JSON null
/// is `Some(None)`, and a value is `Some(Some(v))`. Partial updates use
/// this so clients can clear a nullable field (e.g. `phone`) without the
/// controller confusing that with the field being omitted.
pub fn deserialize_explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
