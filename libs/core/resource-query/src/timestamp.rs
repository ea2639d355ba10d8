//! Creation/update timestamps and the date-range filters over them.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC with
//! millisecond precision (`2024-05-01T09:30:00.000Z`), so lexicographic
//! comparison in the store matches chronological order. Filter bounds are
//! normalized to the same form before they reach a query.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ValidationError, ValidationResult};
use crate::range::bounds_document;

pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// ISO-8601 range; each bound is an RFC 3339 date-time or a `YYYY-MM-DD` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    /// Bounds in stored form. A bare date as `end` covers the whole day.
    fn to_document(&self) -> Option<Document> {
        let start = self
            .start
            .as_deref()
            .and_then(|s| parse_date(s, Bound::Start))
            .map(|dt| Bson::String(format_timestamp(&dt)));
        let end = self
            .end
            .as_deref()
            .and_then(|s| parse_date(s, Bound::End))
            .map(|dt| Bson::String(format_timestamp(&dt)));

        bounds_document(start, end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateRange>,
}

impl Timestamps {
    /// Insert `createdAt`/`updatedAt` range predicates into `filter`.
    pub fn apply(&self, filter: &mut Document) {
        let ranges = [(CREATED_AT, &self.created_at), (UPDATED_AT, &self.updated_at)];
        for (field, range) in ranges {
            if let Some(bounds) = range.as_ref().and_then(DateRange::to_document) {
                filter.insert(field, bounds);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// Parse an RFC 3339 date-time, or a `YYYY-MM-DD` date at the start of the day.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_date(value, Bound::Start)
}

fn parse_date(value: &str, bound: Bound) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?,
    };
    Some(date.and_time(time).and_utc())
}

/// Stored representation of a timestamp.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time truncated to what the stored form keeps.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    parse_timestamp(&format_timestamp(&now)).unwrap_or(now)
}

pub fn validate_timestamps(timestamps: Option<&Timestamps>) -> ValidationResult {
    let Some(timestamps) = timestamps else {
        return Ok(());
    };

    let ranges = [
        (CREATED_AT, &timestamps.created_at),
        (UPDATED_AT, &timestamps.updated_at),
    ];

    for (field, range) in ranges {
        let Some(range) = range else { continue };
        for (bound, value) in [("start", &range.start), ("end", &range.end)] {
            if let Some(value) = value {
                if parse_timestamp(value).is_none() {
                    return Err(ValidationError::bad_request(format!(
                        "{field} {bound} must be a valid ISO-8601 date"
                    )));
                }
            }
        }
    }

    Ok(())
}

/// `#[serde(with = "resource_query::timestamp::rfc3339")]` for `DateTime<Utc>`
/// fields persisted in the stored form.
pub mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
