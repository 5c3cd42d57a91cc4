//! Bitcoin amounts stored in base units and rendered with 8 decimals.
//!
//! JSON always carries amounts as a bare number with exactly eight
//! fractional digits (`1.23456700`), never as a float, so no precision is
//! lost in transit. Reading is more lenient: quoted or unquoted decimals,
//! plain integers (whole coins) and `0x` prefixed hex (base units) are all
//! accepted, and `null` reads as zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::TransactionError;

/// Number of fractional digits in a rendered amount.
pub const DECIMALS: usize = 8;

/// Base units per whole coin.
pub const COIN: u64 = 100_000_000;

/// An amount in base units (satoshis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BtcAmount(pub u64);

impl BtcAmount {
    /// The amount in base units.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for BtcAmount {
    fn from(v: u64) -> Self {
        BtcAmount(v)
    }
}

impl fmt::Display for BtcAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:0>width$}", self.0, width = DECIMALS + 1);
        let (int, frac) = digits.split_at(digits.len() - DECIMALS);
        write!(f, "{}.{}", int, frac)
    }
}

impl FromStr for BtcAmount {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(s);

        if let Some(hex_digits) = s.strip_prefix("0x") {
            return u64::from_str_radix(hex_digits, 16)
                .map(BtcAmount)
                .map_err(|e| TransactionError::InvalidAmount(format!("{}: {}", s, e)));
        }

        let (units, scale) = match s.split_once('.') {
            None => (parse_digits(s)?, DECIMALS),
            Some((int, frac)) => {
                if frac.len() > DECIMALS {
                    return Err(TransactionError::InvalidAmount(format!(
                        "{}: more than {} decimals",
                        s, DECIMALS
                    )));
                }
                (parse_digits(&format!("{}{}", int, frac))?, DECIMALS - frac.len())
            }
        };

        units
            .checked_mul(10u64.pow(scale as u32))
            .map(BtcAmount)
            .ok_or_else(|| TransactionError::InvalidAmount(format!("{}: out of range", s)))
    }
}

fn parse_digits(s: &str) -> Result<u64, TransactionError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransactionError::InvalidAmount(format!("{:?} is not a number", s)));
    }
    s.parse::<u64>()
        .map_err(|e| TransactionError::InvalidAmount(format!("{}: {}", s, e)))
}

impl Serialize for BtcAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BtcAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        match raw.get().trim() {
            "null" => Ok(BtcAmount(0)),
            text => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
