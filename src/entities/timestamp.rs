//! ISO-8601 local date-times as sent by the frontend.
//!
//! Browsers' `datetime-local` inputs drop the seconds (`2023-02-02T14:00`),
//! so parsing accepts minutes-only values alongside full ones.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};

const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date-time '{}', expected ISO format YYYY-MM-DDTHH:MM:SS",
            raw
        ))
    })
}
