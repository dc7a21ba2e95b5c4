//! Central Index Key.

use crate::error::DataError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// SEC Central Index Key.
///
/// Accepts 1 to 10 ASCII digits with or without leading zeros. Always displayed zero-padded to
/// 10 digits, the form used in company facts URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(u64);

impl Cik {
    /// Largest representable CIK.
    pub const MAX: u64 = 9_999_999_999;

    /// Creates a CIK from its numeric value.
    pub const fn new(value: u64) -> Option<Self> {
        if value <= Self::MAX { Some(Self(value)) } else { None }
    }

    /// Returns the numeric value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the zero-padded 10-digit form.
    pub fn padded(self) -> String {
        format!("{:010}", self.0)
    }
}

impl FromStr for Cik {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidCik(s.to_string()));
        }

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DataError::InvalidCik(s.to_string()))
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl Serialize for Cik {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.padded())
    }
}

impl<'de> Deserialize<'de> for Cik {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
