/// outscript primitives - hashing, checksummed encodings and keys.
///
/// This crate provides the foundational building blocks for outscript:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, Keccak-256)
/// - Fixed 32-byte hex identifiers for transaction ids
/// - Elliptic curve cryptography (secp256k1 keys, DER signatures)
/// - Variable-length integer encoding and wire reader/writer
/// - Base58Check, segwit Bech32/Bech32m and CashAddr encodings

pub mod hash;
pub mod hex32;
pub mod util;
pub mod base58;
pub mod segwit;
pub mod cashaddr;
pub mod ec;

mod error;
pub use error::PrimitivesError;
