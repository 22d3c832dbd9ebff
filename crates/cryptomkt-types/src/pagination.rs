//! Pagination section of list responses
//!
//! The exchange reports `previous` and `next` either as a bare integer or
//! as a string. When there is no adjacent page it sends the string
//! `"null"` instead of JSON `null`, so [`Cursor`] accepts all of these and
//! treats anything it cannot read as an integer as absent (zero).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Page cursor that tolerates numeric, quoted and `"null"` encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Cursor(i64);

impl Cursor {
    /// Create a cursor from a page number
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The cursor value (zero when absent)
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Cursor {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Cursor> for i64 {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CursorVisitor;

        impl<'de> Visitor<'de> for CursorVisitor {
            type Value = Cursor;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, a string, or null for a page cursor")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Cursor(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(v).map(Cursor).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Cursor(v.trim().parse().unwrap_or(0)))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Cursor::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Cursor::default())
            }
        }

        deserializer.deserialize_any(CursorVisitor)
    }
}

/// Pagination block attached to paginated responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Previous page (zero when absent)
    #[serde(default)]
    pub previous: Cursor,
    /// Page size
    pub limit: u32,
    /// Current page
    pub page: u32,
    /// Next page (zero when absent)
    #[serde(default)]
    pub next: Cursor,
}

impl Pagination {
    /// Returns true if the response reported a following page
    pub fn has_next(&self) -> bool {
        self.next.get() > i64::from(self.page)
    }
}
