//! Output script generation for a single public key.

use std::collections::HashMap;

use crate::format;
use crate::key::{KeyEncoding, ScriptKey};
use crate::out::Out;
use crate::ScriptError;

/// Derives output scripts in any table format from one public key.
///
/// Generated scripts are memoized by format name, so nested lookups such
/// as `p2sh:p2pkh` compute `p2pkh` only once.
pub struct Script<'a> {
    key: &'a dyn ScriptKey,
    cache: HashMap<String, Vec<u8>>,
}

impl<'a> Script<'a> {
    /// Create a generator for `key`.
    pub fn new(key: &'a dyn ScriptKey) -> Self {
        Script {
            key,
            cache: HashMap::new(),
        }
    }

    /// The key scripts are derived from.
    pub fn key(&self) -> &'a dyn ScriptKey {
        self.key
    }

    /// Generate the script bytes for format `name`.
    ///
    /// Besides the table formats, `pubkey:comp`, `pubkey:uncomp`,
    /// `pubkey:ed25519` and `pubkey:pkix` return the raw key encodings.
    ///
    /// # Returns
    /// `UnsupportedFormat` for an unknown name, or `UnsupportedKeyEncoding`
    /// when the key cannot produce a serialization the format needs.
    pub fn generate(&mut self, name: &str) -> Result<Vec<u8>, ScriptError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let bytes = if let Some(encoding) = KeyEncoding::from_format_name(name) {
            self.key.encode(encoding)?
        } else {
            let format =
                format::lookup(name).ok_or_else(|| ScriptError::UnsupportedFormat(name.to_string()))?;
            let mut out = Vec::new();
            for part in format.parts {
                out.extend_from_slice(&part.bytes(self)?);
            }
            out
        };

        self.cache.insert(name.to_string(), bytes.clone());
        Ok(bytes)
    }

    /// Generate format `name` wrapped in an [`Out`].
    pub fn out(&mut self, name: &str) -> Result<Out, ScriptError> {
        let raw = self.generate(name)?;
        Ok(Out::new(name, raw, Vec::new()))
    }

    /// Render format `name` as an address.
    ///
    /// # Arguments
    /// * `hints` - Network names; the first recognized one picks the
    ///   address encoding, e.g. `&["litecoin"]`.
    pub fn address(&mut self, name: &str, hints: &[&str]) -> Result<String, ScriptError> {
        self.out(name)?.address(hints)
    }
}
