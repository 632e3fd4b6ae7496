//! Local wall-clock dates and day-level normalization.
//!
//! # Responsibility
//! - Normalize source timestamps to local midnight for day-level grouping.
//! - Provide serde adapters that accept date-only and full timestamp input.
//!
//! # Invariants
//! - `normalize_to_midnight` is idempotent and strips every sub-day component.
//! - Offset-carrying input is converted to local wall-clock time before use.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Wall-clock timestamp in the dashboard's local time zone.
pub type LocalTimestamp = NaiveDateTime;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
const SERIALIZE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Drops the time-of-day component, yielding `00:00:00.000` on the same day.
pub fn normalize_to_midnight(value: LocalTimestamp) -> LocalTimestamp {
    value.date().and_time(NaiveTime::MIN)
}

/// Converts an offset-aware timestamp into local wall-clock time.
pub fn to_local_timestamp<Tz: TimeZone>(value: &DateTime<Tz>) -> LocalTimestamp {
    value.with_timezone(&Local).naive_local()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> LocalTimestamp {
    date.and_time(NaiveTime::MIN)
}

/// Parses one timestamp from wire text.
///
/// Accepted shapes:
/// - `YYYY-MM-DD` (midnight)
/// - `YYYY-MM-DDTHH:MM:SS[.fff]` or with a space separator
/// - RFC 3339 with offset, converted to local wall-clock time
pub fn parse_local_timestamp(value: &str) -> Option<LocalTimestamp> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(start_of_day(date));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|parsed| to_local_timestamp(&parsed))
}

/// Serde adapter for required `LocalTimestamp` fields.
pub mod serde_local {
    use super::{parse_local_timestamp, LocalTimestamp, SERIALIZE_FORMAT};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &LocalTimestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(SERIALIZE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LocalTimestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_local_timestamp(raw.as_str())
            .ok_or_else(|| D::Error::custom(format!("unrecognized date or timestamp `{raw}`")))
    }

    /// Variant for `Option<LocalTimestamp>` fields; pair with `#[serde(default)]`.
    pub mod option {
        use super::{parse_local_timestamp, LocalTimestamp, SERIALIZE_FORMAT};
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<LocalTimestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.collect_str(&value.format(SERIALIZE_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<LocalTimestamp>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_local_timestamp(raw.as_str()).map(Some).ok_or_else(|| {
                    D::Error::custom(format!("unrecognized date or timestamp `{raw}`"))
                }),
            }
        }
    }
}
