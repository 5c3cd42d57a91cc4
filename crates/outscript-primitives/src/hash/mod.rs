//! Hash function primitives for outscript.
//!
//! Provides SHA-256, double SHA-256, RIPEMD-160, Hash160 and Keccak-256,
//! plus the account-style "ether hash" used for EVM addresses. The
//! [`HashAlgo`] enum names each function so script formats can describe
//! a chain of hashes as static data.

use std::fmt;

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// This is the standard hash function used for transaction IDs,
/// signature hashes and Base58Check checksums. Computes SHA-256(SHA-256(data)).
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used for key and script hashes embedded in output scripts.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute the original Keccak-256 (not NIST SHA3-256) of the input data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the account-style address hash of a SEC1 uncompressed public key.
///
/// The leading byte of `data` (the `0x04` point tag) is skipped, the rest is
/// hashed with Keccak-256, and the last 20 bytes of the digest are returned.
pub fn ether_hash(data: &[u8]) -> [u8; 20] {
    let body = data.get(1..).unwrap_or_default();
    let digest = keccak256(body);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest[12..]);
    out
}

/// A named hash function, usable as static data in script formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgo {
    /// SHA-256.
    Sha256,
    /// RIPEMD-160.
    Ripemd160,
    /// Keccak-256.
    Keccak256,
    /// Keccak-256 over `data[1..]`, truncated to the last 20 bytes.
    EtherHash,
}

impl HashAlgo {
    /// Apply this hash function to `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgo::Sha256 => sha256(data).to_vec(),
            HashAlgo::Ripemd160 => ripemd160(data).to_vec(),
            HashAlgo::Keccak256 => keccak256(data).to_vec(),
            HashAlgo::EtherHash => ether_hash(data).to_vec(),
        }
    }

    /// Short lowercase name, e.g. `sha256`.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgo::Sha256 => "sha256",
            HashAlgo::Ripemd160 => "ripemd160",
            HashAlgo::Keccak256 => "keccak256",
            HashAlgo::EtherHash => "etherhash",
        }
    }
}

impl fmt::Display for HashAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply each algorithm in `algos` in order, feeding each output into the next.
///
/// An empty chain returns `data` unchanged.
pub fn hash_chain(data: &[u8], algos: &[HashAlgo]) -> Vec<u8> {
    let mut cur = data.to_vec();
    for algo in algos {
        cur = algo.digest(&cur);
    }
    cur
}
