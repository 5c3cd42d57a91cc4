//! Public key capabilities consumed by the format engine.
//!
//! A format only asks a key for the serializations it needs. Keys expose
//! whichever encodings they support through [`ScriptKey`]; asking for one
//! a key cannot produce is an error, not a panic.

use std::fmt;

use outscript_primitives::ec::PublicKey;

use crate::ScriptError;

/// DER prefix of a secp256k1 SubjectPublicKeyInfo, followed by the
/// uncompressed point.
const SECP256K1_SPKI_PREFIX: [u8; 23] = [
    0x30, 0x56, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x42, 0x00,
];

/// DER prefix of an Ed25519 SubjectPublicKeyInfo, followed by the 32-byte key.
const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// A public key serialization a format can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEncoding {
    /// 33-byte SEC1 compressed point.
    Compressed,
    /// 65-byte SEC1 uncompressed point.
    Uncompressed,
    /// Raw 32-byte Ed25519 key.
    Ed25519,
    /// DER SubjectPublicKeyInfo.
    Pkix,
}

impl KeyEncoding {
    /// Every encoding, in lookup order.
    pub const ALL: [KeyEncoding; 4] = [
        KeyEncoding::Pkix,
        KeyEncoding::Ed25519,
        KeyEncoding::Compressed,
        KeyEncoding::Uncompressed,
    ];

    /// The format name that selects this encoding, e.g. `pubkey:comp`.
    pub fn format_name(self) -> &'static str {
        match self {
            KeyEncoding::Compressed => "pubkey:comp",
            KeyEncoding::Uncompressed => "pubkey:uncomp",
            KeyEncoding::Ed25519 => "pubkey:ed25519",
            KeyEncoding::Pkix => "pubkey:pkix",
        }
    }

    /// Resolve a `pubkey:*` format name.
    pub fn from_format_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.format_name() == name)
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyEncoding::Compressed => "compressed",
            KeyEncoding::Uncompressed => "uncompressed",
            KeyEncoding::Ed25519 => "ed25519",
            KeyEncoding::Pkix => "pkix",
        };
        f.write_str(s)
    }
}

/// A public key that output scripts can be derived from.
///
/// Every encoding defaults to unsupported; implementors override the ones
/// their key type can produce.
pub trait ScriptKey {
    /// Short name of the key type, used in error messages.
    fn key_type(&self) -> &'static str;

    /// SEC1 compressed serialization.
    fn compressed(&self) -> Option<Vec<u8>> {
        None
    }

    /// SEC1 uncompressed serialization.
    fn uncompressed(&self) -> Option<Vec<u8>> {
        None
    }

    /// Raw Ed25519 key bytes.
    fn ed25519(&self) -> Option<Vec<u8>> {
        None
    }

    /// DER SubjectPublicKeyInfo.
    fn pkix(&self) -> Option<Vec<u8>> {
        None
    }

    /// Produce `encoding`, or fail naming the key type and encoding.
    fn encode(&self, encoding: KeyEncoding) -> Result<Vec<u8>, ScriptError> {
        let bytes = match encoding {
            KeyEncoding::Compressed => self.compressed(),
            KeyEncoding::Uncompressed => self.uncompressed(),
            KeyEncoding::Ed25519 => self.ed25519(),
            KeyEncoding::Pkix => self.pkix(),
        };
        bytes.ok_or(ScriptError::UnsupportedKeyEncoding {
            key_type: self.key_type(),
            encoding: encoding.format_name(),
        })
    }
}

impl ScriptKey for PublicKey {
    fn key_type(&self) -> &'static str {
        "secp256k1"
    }

    fn compressed(&self) -> Option<Vec<u8>> {
        Some(self.to_compressed().to_vec())
    }

    fn uncompressed(&self) -> Option<Vec<u8>> {
        Some(self.to_uncompressed().to_vec())
    }

    fn pkix(&self) -> Option<Vec<u8>> {
        let mut out = SECP256K1_SPKI_PREFIX.to_vec();
        out.extend_from_slice(&self.to_uncompressed());
        Some(out)
    }
}

/// A raw Ed25519 public key.
///
/// Only the key bytes are held; no point validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Key(pub [u8; 32]);

impl Ed25519Key {
    /// Wrap a 32-byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            ScriptError::InvalidScript(format!(
                "ed25519 key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Ed25519Key(arr))
    }
}

impl ScriptKey for Ed25519Key {
    fn key_type(&self) -> &'static str {
        "ed25519"
    }

    fn ed25519(&self) -> Option<Vec<u8>> {
        Some(self.0.to_vec())
    }

    fn pkix(&self) -> Option<Vec<u8>> {
        let mut out = ED25519_SPKI_PREFIX.to_vec();
        out.extend_from_slice(&self.0);
        Some(out)
    }
}
