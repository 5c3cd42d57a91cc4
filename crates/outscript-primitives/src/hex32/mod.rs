//! Fixed 32-byte identifier used for previous-transaction ids.
//!
//! A [`Hex32`] stores its bytes in display order, the order a block
//! explorer prints a txid. The wire format carries the same bytes
//! reversed; [`Hex32::reversed`] produces that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Size of a Hex32 in bytes.
pub const HEX32_SIZE: usize = 32;

/// A 32-byte value rendered as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Hex32(pub [u8; HEX32_SIZE]);

impl Hex32 {
    /// Wrap a raw 32-byte array (display order).
    pub fn new(bytes: [u8; HEX32_SIZE]) -> Self {
        Hex32(bytes)
    }

    /// Create a Hex32 from a slice that must be exactly 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HEX32_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "hex32 must be {} bytes long, got {}",
                HEX32_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Hex32(arr))
    }

    /// Parse exactly 64 hex characters. No byte reversal is applied.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let decoded = hex::decode(hex_str)?;
        Self::from_bytes(&decoded)
    }

    /// Build a Hex32 from wire-order bytes, reversing them into display order.
    pub fn from_wire(mut bytes: [u8; HEX32_SIZE]) -> Self {
        bytes.reverse();
        Hex32(bytes)
    }

    /// Hex-encode the bytes in display order.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Return the bytes in wire order.
    pub fn reversed(&self) -> [u8; HEX32_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }

    /// Access the display-order bytes.
    pub fn as_bytes(&self) -> &[u8; HEX32_SIZE] {
        &self.0
    }
}

impl fmt::Display for Hex32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Hex32 {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hex32::from_hex(s)
    }
}

impl From<[u8; HEX32_SIZE]> for Hex32 {
    fn from(bytes: [u8; HEX32_SIZE]) -> Self {
        Hex32(bytes)
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for Hex32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Deserialize from a hex string; JSON `null` yields the all-zero value.
impl<'de> Deserialize<'de> for Hex32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => Hex32::from_hex(&s).map_err(serde::de::Error::custom),
            None => Ok(Hex32::default()),
        }
    }
}
