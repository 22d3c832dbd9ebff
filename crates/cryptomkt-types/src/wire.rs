//! Bidirectional wire-string tables for exchange enums
//!
//! Each enum owns exactly one [`WireTable`], built on first use and
//! read-only afterwards. The table is the single place that maps members
//! to the strings the exchange sends and back.
//!
//! Decoding from JSON is lenient: a string the table does not know, or
//! `null`, decodes to the enum's zero-value member and logs a warning,
//! matching how the exchange client has always behaved. Use [`WireEnum::from_wire`] or
//! `FromStr` when an unknown string must be an error instead.

use serde::{Deserialize, Deserializer, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::warn;

use crate::error::{TypesError, TypesResult};

/// Read-only mapping between enum members and their wire strings
pub struct WireTable<T: 'static> {
    kind: &'static str,
    members: &'static [T],
    to_wire: HashMap<T, &'static str>,
    from_wire: HashMap<&'static str, T>,
}

impl<T> WireTable<T>
where
    T: Copy + Eq + Hash + 'static,
{
    /// Build a table from the full member list and the forward mapping
    pub fn new(kind: &'static str, members: &'static [T], wire: fn(&T) -> &'static str) -> Self {
        let to_wire: HashMap<T, &'static str> = members.iter().map(|m| (*m, wire(m))).collect();
        let from_wire = to_wire.iter().map(|(m, s)| (*s, *m)).collect();

        Self {
            kind,
            members,
            to_wire,
            from_wire,
        }
    }

    /// Name of the enum this table serves
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Wire string for a member
    pub fn wire(&self, member: T) -> Option<&'static str> {
        self.to_wire.get(&member).copied()
    }

    /// Exact-match lookup of a wire string
    pub fn lookup(&self, wire: &str) -> Option<T> {
        self.from_wire.get(wire).copied()
    }

    /// All members in declaration order
    pub fn members(&self) -> &'static [T] {
        self.members
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for WireTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireTable")
            .field("kind", &self.kind)
            .field("members", &self.members)
            .finish()
    }
}

/// An enum whose string form is owned by a [`WireTable`]
pub trait WireEnum: Copy + Eq + Hash + Default + Send + Sync + 'static {
    /// The enum's table
    fn table() -> &'static WireTable<Self>;

    /// Wire string for this member
    fn as_str(&self) -> &'static str;

    /// Strict lookup, `None` for unknown strings
    fn from_wire(wire: &str) -> Option<Self> {
        Self::table().lookup(wire)
    }

    /// Strict parse with a typed error
    fn parse_wire(wire: &str) -> TypesResult<Self> {
        Self::from_wire(wire).ok_or_else(|| TypesError::unknown_variant(Self::table().kind(), wire))
    }

    /// Lenient lookup: unknown strings become the zero-value member
    fn from_wire_lenient(wire: &str) -> Self {
        match Self::from_wire(wire) {
            Some(member) => member,
            None => {
                let fallback = Self::default();
                warn!(
                    kind = Self::table().kind(),
                    value = wire,
                    fallback = fallback.as_str(),
                    "Unrecognized wire value, using zero value"
                );
                fallback
            }
        }
    }
}

/// Serialize a wire enum as its string
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: WireEnum,
    S: Serializer,
{
    serializer.serialize_str(value.as_str())
}

/// Deserialize a wire enum from its string, falling back to the zero value
///
/// `null` reads as the empty string and so also yields the zero value.
pub fn deserialize_lenient<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: WireEnum,
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(T::from_wire_lenient(&raw))
}

/// Implements `Display`, `FromStr` and serde for a [`WireEnum`]
macro_rules! impl_wire_traits {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad($crate::wire::WireEnum::as_str(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::wire::WireEnum>::parse_wire(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::wire::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::wire::deserialize_lenient(deserializer)
            }
        }
    };
}

pub(crate) use impl_wire_traits;
