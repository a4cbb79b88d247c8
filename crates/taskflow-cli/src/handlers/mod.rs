pub mod apply;
pub mod board;
pub mod column;
pub mod task;

use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

/// Parse a flag value with the type's `FromStr`, naming the flag on failure.
pub fn parse_value<T>(flag: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| anyhow::anyhow!("--{}: {}", flag, e))
}

pub fn parse_all<T>(flag: &str, values: &[String]) -> anyhow::Result<Vec<T>>
where
    T: FromStr<Err = String>,
{
    values.iter().map(|v| parse_value(flag, v)).collect()
}

pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| ())
                .and_then(|d| d.and_hms_opt(0, 0, 0).ok_or(()))
                .map(|dt| dt.and_utc())
        })
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid date '{}'. Supported formats: YYYY-MM-DD or RFC 3339 (e.g., 2024-01-15T10:30:00Z)",
                s
            )
        })
}
