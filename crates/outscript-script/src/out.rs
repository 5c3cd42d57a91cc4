//! A generated or parsed output script together with its format name.

use std::fmt;

use outscript_primitives::hash::hash160;
use serde::{Deserialize, Serialize};

use crate::pushdata::parse_push_bytes;
use crate::ScriptError;

/// An output script tagged with the format it was built from or guessed as.
///
/// `flags` carry extra context such as the network an address was parsed
/// for (`litecoin`, `bitcoin-cash`, ...) or `invalid` for scripts that
/// could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutRepr")]
pub struct Out {
    name: String,
    script: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<String>,
    #[serde(skip)]
    raw: Vec<u8>,
}

#[derive(Deserialize)]
struct OutRepr {
    name: String,
    script: String,
    #[serde(default)]
    flags: Vec<String>,
}

impl TryFrom<OutRepr> for Out {
    type Error = ScriptError;

    fn try_from(repr: OutRepr) -> Result<Self, Self::Error> {
        let raw = hex::decode(&repr.script)?;
        Ok(Out {
            name: repr.name,
            script: repr.script,
            flags: repr.flags,
            raw,
        })
    }
}

impl Out {
    /// Build an Out from a format name and script bytes.
    pub fn new(name: impl Into<String>, raw: Vec<u8>, flags: Vec<String>) -> Self {
        Out {
            name: name.into(),
            script: hex::encode(&raw),
            flags,
            raw,
        }
    }

    pub(crate) fn with_flags(name: &str, raw: Vec<u8>, flags: &[&str]) -> Self {
        Out::new(name, raw, flags.iter().map(|f| f.to_string()).collect())
    }

    /// Format name, e.g. `p2sh:p2wpkh`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase hex of the script.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Context flags.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// The raw script bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The name up to the first `:`, so `p2sh:p2pkh` gives `p2sh`.
    pub fn base_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((base, _)) => base,
            None => &self.name,
        }
    }

    /// Extract the hash an address of this script encodes.
    ///
    /// Pay-to-pubkey scripts yield the hash160 of the embedded key. Returns
    /// `None` for formats without a hash or scripts too short to hold one.
    /// Matching is on the full name, so composite names such as
    /// `p2sh:p2pkh` or `p2wsh:p2pk` also give `None`.
    pub fn hash(&self) -> Option<Vec<u8>> {
        let push_at = |offset: usize| {
            self.raw
                .get(offset..)
                .and_then(|rest| parse_push_bytes(rest).0)
                .map(<[u8]>::to_vec)
        };
        match self.name.as_str() {
            "p2wpkh" | "p2tr" => push_at(1),
            "p2pkh" | "p2pukh" => push_at(2),
            "p2pk" | "p2puk" => parse_push_bytes(&self.raw).0.map(|k| hash160(k).to_vec()),
            "p2sh" => push_at(1),
            "eth" => Some(self.raw.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Out {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.script)
    }
}
