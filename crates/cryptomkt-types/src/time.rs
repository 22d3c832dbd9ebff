//! Exchange timestamps
//!
//! The exchange emits timestamps in one of two layouts, both without a
//! timezone (UTC is implied):
//!
//! - a year-less stamp with microseconds: `Aug 31 21:39:52.123456`
//! - a local ISO-8601 date-time: `2017-08-31T21:39:52.123456`
//!
//! Parsing tries them in that order. The year-less stamp takes its year
//! from the caller (the current UTC year when decoding JSON); a `Feb 29`
//! stamp falls back to the nearest preceding leap year.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{TypesError, TypesResult};

/// Year-less stamp with optional fractional seconds
pub const STAMP_FORMAT: &str = "%b %e %H:%M:%S%.f";

/// ISO-8601 date-time without offset, optional fractional seconds
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamp decoded from an exchange response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExchangeTime(DateTime<Utc>);

impl ExchangeTime {
    /// Wrap an instant
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Parse either supported layout, dating year-less stamps in the current year
    pub fn parse(s: &str) -> TypesResult<Self> {
        Self::parse_with_year(s, Utc::now().year())
    }

    /// Parse either supported layout, dating year-less stamps in `year`
    pub fn parse_with_year(s: &str, year: i32) -> TypesResult<Self> {
        if let Some(instant) = parse_stamp(s, year) {
            return Ok(Self(instant));
        }

        NaiveDateTime::parse_from_str(s, ISO_FORMAT)
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .map_err(|_| TypesError::InvalidTimestamp(s.to_string()))
    }

    /// The instant as a UTC date-time
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unwrap into the UTC date-time
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

/// Years searched back for a leap year when a stamp reads `Feb 29`
const LEAP_LOOKBACK: i32 = 8;

fn parse_stamp(s: &str, year: i32) -> Option<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, StrftimeItems::new(STAMP_FORMAT)).ok()?;

    // Only Feb 29 is valid in some years and not others; date it in the
    // nearest leap year at or before `year`.
    (0..LEAP_LOOKBACK).find_map(|back| {
        let mut dated = parsed.clone();
        dated.set_year(i64::from(year - back)).ok()?;
        let naive = dated.to_naive_datetime_with_offset(0).ok()?;
        Some(Utc.from_utc_datetime(&naive))
    })
}

impl From<DateTime<Utc>> for ExchangeTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for ExchangeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.6f"))
    }
}

impl Serialize for ExchangeTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExchangeTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
