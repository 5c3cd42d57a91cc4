//! The table of named output script formats.
//!
//! Each format is a sequence of [`Insertable`] pieces concatenated in
//! order. `p2sh:X` and `p2wsh:X` wrap the script produced by format `X`.

use outscript_primitives::hash::HashAlgo;

use crate::insertable::Insertable;
use crate::key::KeyEncoding;
use crate::opcodes::*;

/// A named output script format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Format name, e.g. `p2sh:p2wpkh`.
    pub name: &'static str,
    /// Pieces concatenated to form the script.
    pub parts: &'static [Insertable],
}

const HASH160: &[HashAlgo] = &[HashAlgo::Sha256, HashAlgo::Ripemd160];
const SHA256: &[HashAlgo] = &[HashAlgo::Sha256];

const PUBKEY_COMP: Insertable = Insertable::PubKey(KeyEncoding::Compressed);
const PUBKEY_UNCOMP: Insertable = Insertable::PubKey(KeyEncoding::Uncompressed);

const DUP_HASH160: Insertable = Insertable::Bytes(&[OP_DUP, OP_HASH160]);
const EQUALVERIFY_CHECKSIG: Insertable = Insertable::Bytes(&[OP_EQUALVERIFY, OP_CHECKSIG]);
const CHECKSIG: Insertable = Insertable::Bytes(&[OP_CHECKSIG]);
const HASH160_OP: Insertable = Insertable::Bytes(&[OP_HASH160]);
const EQUAL: Insertable = Insertable::Bytes(&[OP_EQUAL]);
const WITNESS_V0: Insertable = Insertable::Bytes(&[OP_0]);

/// `OP_HASH160 push(hash160(inner)) OP_EQUAL`
macro_rules! p2sh {
    ($name:literal, $inner:literal) => {
        Format {
            name: $name,
            parts: &[
                HASH160_OP,
                Insertable::PushBytes(&Insertable::Hash(&Insertable::Lookup($inner), HASH160)),
                EQUAL,
            ],
        }
    };
}

/// `OP_0 push(sha256(inner))`
macro_rules! p2wsh {
    ($name:literal, $inner:literal) => {
        Format {
            name: $name,
            parts: &[
                WITNESS_V0,
                Insertable::PushBytes(&Insertable::Hash(&Insertable::Lookup($inner), SHA256)),
            ],
        }
    };
}

/// Every supported format, in the order [`crate::get_outs`] reports them.
pub static FORMATS: &[Format] = &[
    Format {
        name: "p2pkh",
        parts: &[
            DUP_HASH160,
            Insertable::PushBytes(&Insertable::Hash(&PUBKEY_COMP, HASH160)),
            EQUALVERIFY_CHECKSIG,
        ],
    },
    Format {
        name: "p2pukh",
        parts: &[
            DUP_HASH160,
            Insertable::PushBytes(&Insertable::Hash(&PUBKEY_UNCOMP, HASH160)),
            EQUALVERIFY_CHECKSIG,
        ],
    },
    Format {
        name: "p2pk",
        parts: &[Insertable::PushBytes(&PUBKEY_COMP), CHECKSIG],
    },
    Format {
        name: "p2puk",
        parts: &[Insertable::PushBytes(&PUBKEY_UNCOMP), CHECKSIG],
    },
    Format {
        name: "p2wpkh",
        parts: &[
            WITNESS_V0,
            Insertable::PushBytes(&Insertable::Hash(&PUBKEY_COMP, HASH160)),
        ],
    },
    p2sh!("p2sh:p2pkh", "p2pkh"),
    p2wsh!("p2wsh:p2pkh", "p2pkh"),
    p2sh!("p2sh:p2pukh", "p2pukh"),
    p2wsh!("p2wsh:p2pukh", "p2pukh"),
    p2sh!("p2sh:p2pk", "p2pk"),
    p2wsh!("p2wsh:p2pk", "p2pk"),
    p2sh!("p2sh:p2puk", "p2puk"),
    p2wsh!("p2wsh:p2puk", "p2puk"),
    p2sh!("p2sh:p2wpkh", "p2wpkh"),
    p2wsh!("p2wsh:p2wpkh", "p2wpkh"),
    Format {
        name: "eth",
        parts: &[Insertable::Hash(&PUBKEY_UNCOMP, &[HashAlgo::EtherHash])],
    },
];

/// Find a format by name.
pub fn lookup(name: &str) -> Option<&'static Format> {
    FORMATS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        for (i, f) in FORMATS.iter().enumerate() {
            assert!(
                FORMATS[i + 1..].iter().all(|g| g.name != f.name),
                "duplicate format {}",
                f.name
            );
        }
        assert_eq!(FORMATS.len(), 16);
    }

    /// Every lookup refers to a format defined in the table.
    #[test]
    fn test_lookups_resolve() {
        fn check(piece: &Insertable) {
            match piece {
                Insertable::Lookup(name) => assert!(lookup(name).is_some(), "{}", name),
                Insertable::PushBytes(inner) | Insertable::Hash(inner, _) => check(inner),
                _ => {}
            }
        }
        for f in FORMATS {
            f.parts.iter().for_each(check);
        }
        assert!(lookup("p2tr").is_none());
    }
}
