//! Building blocks of an output script format.

use std::fmt;

use outscript_primitives::hash::{hash_chain, HashAlgo};

use crate::key::KeyEncoding;
use crate::pushdata::push_bytes;
use crate::script::Script;
use crate::ScriptError;

/// One piece of a format definition.
///
/// Pieces are `'static` data so the whole format table can live in a
/// `static`. Evaluating a piece against a [`Script`] yields its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertable {
    /// Literal bytes.
    Bytes(&'static [u8]),
    /// The output of another named format.
    Lookup(&'static str),
    /// The inner piece wrapped in a script push.
    PushBytes(&'static Insertable),
    /// The inner piece run through a chain of hashes.
    Hash(&'static Insertable, &'static [HashAlgo]),
    /// The script's public key in the given encoding.
    PubKey(KeyEncoding),
}

impl Insertable {
    /// Evaluate this piece for the key held by `script`.
    pub fn bytes(&self, script: &mut Script<'_>) -> Result<Vec<u8>, ScriptError> {
        match *self {
            Insertable::Bytes(b) => Ok(b.to_vec()),
            Insertable::Lookup(name) => script.generate(name),
            Insertable::PushBytes(inner) => Ok(push_bytes(&inner.bytes(script)?)),
            Insertable::Hash(inner, algos) => Ok(hash_chain(&inner.bytes(script)?, algos)),
            Insertable::PubKey(encoding) => script.key().encode(encoding),
        }
    }
}

impl fmt::Display for Insertable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insertable::Bytes(b) => f.write_str(&hex::encode(b)),
            Insertable::Lookup(name) => f.write_str(name),
            Insertable::PushBytes(inner) => write!(f, "PushBytes({})", inner),
            Insertable::Hash(inner, algos) => {
                let names: Vec<&str> = algos.iter().map(|a| a.name()).collect();
                write!(f, "Hash({}, [{}])", inner, names.join(" "))
            }
            Insertable::PubKey(encoding) => write!(f, "PubKey({})", encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static HASHED: Insertable = Insertable::Hash(
        &Insertable::PubKey(KeyEncoding::Compressed),
        &[HashAlgo::Sha256, HashAlgo::Ripemd160],
    );

    #[test]
    fn test_display() {
        assert_eq!(Insertable::Bytes(&[0x76, 0xa9]).to_string(), "76a9");
        assert_eq!(Insertable::Lookup("p2pkh").to_string(), "p2pkh");
        assert_eq!(
            Insertable::PushBytes(&HASHED).to_string(),
            "PushBytes(Hash(PubKey(compressed), [sha256 ripemd160]))"
        );
        assert_eq!(
            Insertable::PubKey(KeyEncoding::Uncompressed).to_string(),
            "PubKey(uncompressed)"
        );
    }
}
