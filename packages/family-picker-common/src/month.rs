use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Month};
use cosmwasm_std::{StdError, StdResult, Timestamp};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest UTC offset a calendar can use (UTC+14 / UTC-12, rounded to 14h both ways).
pub const MAX_UTC_OFFSET_SECONDS: i32 = 14 * 3600;

/// A calendar month, the primary key of the draw ledger.
///
/// Canonical text form is `"YYYY-M"` with no zero padding (`"2026-3"`,
/// `"2026-10"`). Ordering is chronological.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    /// Month containing `now`, seen from a fixed offset east of UTC.
    pub fn from_timestamp(now: Timestamp, utc_offset_seconds: i32) -> StdResult<Self> {
        let offset = FixedOffset::east_opt(utc_offset_seconds).ok_or_else(|| {
            StdError::generic_err(format!("utc offset out of range: {utc_offset_seconds}"))
        })?;
        let secs = i64::try_from(now.seconds())
            .map_err(|_| StdError::generic_err("timestamp out of range"))?;
        let utc = DateTime::from_timestamp(secs, now.subsec_nanos() as u32)
            .ok_or_else(|| StdError::generic_err("timestamp out of range"))?;
        let local = utc.with_timezone(&offset);

        Ok(MonthKey {
            year: local.year(),
            month: local.month(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Human-readable name, e.g. `"October 2026"`.
    pub fn display_name(&self) -> String {
        match u8::try_from(self.month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.to_string(),
        }
    }

    pub fn storage_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Error returned when a month key does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthKeyError(pub String);

impl fmt::Display for ParseMonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month key: {:?} (expected YYYY-M)", self.0)
    }
}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    /// Accepts the canonical form and zero-padded months (`"2026-03"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMonthKeyError(s.to_string());
        let trimmed = s.trim();
        // A leading '-' belongs to the year, so split on the last separator.
        let (year, month) = trimmed.rsplit_once('-').ok_or_else(err)?;
        if year.is_empty() || month.is_empty() || month.len() > 2 {
            return Err(err());
        }
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        MonthKey::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ParseMonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl JsonSchema for MonthKey {
    fn schema_name() -> String {
        "MonthKey".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}
