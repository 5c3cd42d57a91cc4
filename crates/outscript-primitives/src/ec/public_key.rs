//! secp256k1 public key.
//!
//! Wraps the k256 verifying key and exposes the two SEC1 serializations
//! that output scripts embed or hash.

use std::fmt;

use k256::ecdsa::VerifyingKey;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 bytes, compressed (33) or uncompressed (65).
    ///
    /// # Returns
    /// An error if the bytes are empty or don't describe a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 format: `02`/`03` prefix and the X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 format: `04` prefix, X and Y.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of the compressed serialization.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the compressed serialization.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify an ECDSA signature over `hash` with this key.
    pub fn verify(&self, hash: &[u8], sig: &Signature) -> bool {
        sig.verify(hash, self)
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMP: &str = "0208c27162565b6660961b5de8b4a21abcd7bfd197b7e85d6709e8b71055b2c8b2";
    const UNCOMP: &str = "0408c27162565b6660961b5de8b4a21abcd7bfd197b7e85d6709e8b71055b2c8b2\
                          95261ab7dd1818cb9bc4090b242b7e36f1ef3be5396af56676e9b39caf73b194";

    #[test]
    fn test_compressed_and_uncompressed_agree() {
        let from_comp = PublicKey::from_hex(COMP).unwrap();
        let from_uncomp = PublicKey::from_hex(UNCOMP).unwrap();
        assert_eq!(from_comp, from_uncomp);
        assert_eq!(hex::encode(from_comp.to_uncompressed()), UNCOMP);
        assert_eq!(hex::encode(from_uncomp.to_compressed()), COMP);
        assert_eq!(from_comp.to_string(), COMP);
    }

    #[test]
    fn test_hash160() {
        let key = PublicKey::from_hex(COMP).unwrap();
        assert_eq!(
            hex::encode(key.hash160()),
            "ab4996a0ed164be1564013917ec5a5a4b10563fe"
        );
    }

    #[test]
    fn test_invalid_keys() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x05]).is_err());
        // x coordinate off the curve
        let mut bad = hex::decode(UNCOMP).unwrap();
        bad[1] ^= 0x04;
        assert!(PublicKey::from_bytes(&bad).is_err());
        assert!(PublicKey::from_hex("xyz").is_err());
    }
}
