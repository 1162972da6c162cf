//! Calendar dates as the UI shows them (`DD.MM.YYYY`) and as the API
//! carries them (`YYYY-MM-DD`, or epoch milliseconds from older endpoints).

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

const DISPLAY_FORMAT: &str = "%d.%m.%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// `DD.MM.YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Parse `DD.MM.YYYY`. Anything else, including impossible dates like
/// `31.02.2024`, is `None`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.split('.').count() != 3 {
        return None;
    }
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT).ok()
}

/// `YYYY-MM-DD`
pub fn to_iso_date_string(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn from_iso_date_string(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, ISO_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::<FixedOffset>::parse_from_rfc3339(input) {
        return Some(ts.date_naive());
    }
    input
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, ISO_FORMAT).ok())
}

pub fn from_epoch_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|ts| ts.date_naive())
}

/// Serde for `Option<NaiveDate>` fields. Writes `YYYY-MM-DD`, reads that,
/// timestamps, epoch millis or `null`.
pub mod optional {
    use super::{from_epoch_millis, from_iso_date_string, to_iso_date_string};
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&to_iso_date_string(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            Value::String(s) => from_iso_date_string(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {s}"))),
            Value::Number(n) => n
                .as_i64()
                .and_then(from_epoch_millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {n}"))),
            other => Err(D::Error::custom(format!("invalid date: {other}"))),
        }
    }
}
