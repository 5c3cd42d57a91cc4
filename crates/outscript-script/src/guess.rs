//! Classification of existing scripts.
//!
//! Guessing never fails: scripts that match no known template come back
//! as an `invalid` [`Out`].

use outscript_primitives::ec::public_key::{COMPRESSED_LEN, UNCOMPRESSED_LEN};
use outscript_primitives::hash::hash160;

use crate::format::FORMATS;
use crate::key::ScriptKey;
use crate::opcodes::*;
use crate::out::Out;
use crate::pushdata::{parse_push_bytes, push_bytes};
use crate::script::Script;

const P2PKH_REFINEMENTS: [&str; 2] = ["p2pkh", "p2pukh"];
const P2SH_REFINEMENTS: [&str; 5] = [
    "p2sh:p2pk",
    "p2sh:p2pkh",
    "p2sh:p2puk",
    "p2sh:p2pukh",
    "p2sh:p2wpkh",
];

/// The first of `candidates` that `hint` generates exactly `script` for.
fn refine(script: &[u8], hint: Option<&dyn ScriptKey>, candidates: &[&'static str]) -> Option<&'static str> {
    let mut s = Script::new(hint?);
    candidates
        .iter()
        .copied()
        .find(|name| s.generate(name).is_ok_and(|generated| generated == script))
}

/// Classify `script` by its template.
///
/// With a `hint` key, hashed templates are refined to the exact format the
/// key produces, such as telling `p2pukh` from `p2pkh` or naming the script
/// behind a `p2sh`. Without a hint the generic name is returned.
pub fn guess_out(script: &[u8], hint: Option<&dyn ScriptKey>) -> Out {
    let out = |name: &str| Out::new(name, script.to_vec(), Vec::new());
    let (Some(&first), Some(&last)) = (script.first(), script.last()) else {
        return Out::with_flags("empty", Vec::new(), &["invalid"]);
    };

    match first {
        OP_0 => {
            return match script.len() {
                22 => out("p2wpkh"),
                34 => out("p2wsh"),
                _ => out("invalid"),
            }
        }
        OP_1 => {
            let taproot = (script.len() == 34 && script[1] == 0x20) || script.len() == 32;
            return out(if taproot { "p2tr" } else { "invalid" });
        }
        OP_RETURN => return out("op_return"),
        _ => {}
    }

    if last == OP_CHECKSIG {
        if script.len() == 25
            && script.starts_with(&[OP_DUP, OP_HASH160, 0x14])
            && script.ends_with(&[OP_EQUALVERIFY, OP_CHECKSIG])
        {
            return out(refine(script, hint, &P2PKH_REFINEMENTS).unwrap_or("p2pkh"));
        }
        if let (Some(key), used) = parse_push_bytes(script) {
            if used + 1 == script.len() && push_bytes(key).len() == used {
                match key.len() {
                    COMPRESSED_LEN => return out("p2pk"),
                    UNCOMPRESSED_LEN => return out("p2puk"),
                    _ => {}
                }
            }
        }
    } else if last == OP_EQUAL && first == OP_HASH160 {
        if let (Some(hash), used) = parse_push_bytes(&script[1..]) {
            if used + 2 == script.len() && push_bytes(hash).len() == used {
                return out(refine(script, hint, &P2SH_REFINEMENTS).unwrap_or("p2sh"));
            }
        }
    }

    out("invalid")
}

/// Extract the public key (when present) and the address hash from an
/// output script.
///
/// Only exact standard layouts are recognized: P2PKH, P2SH, P2PK with a
/// compressed or uncompressed key, P2WPKH and P2WSH (whose 32-byte program
/// is returned as the hash).
pub fn guess_pubkey_and_hash_by_out_script(script: &[u8]) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    let hash_only = |range: std::ops::Range<usize>| (None, Some(script[range].to_vec()));
    let with_key = |key: &[u8]| (Some(key.to_vec()), Some(hash160(key).to_vec()));

    match script {
        [OP_DUP, OP_HASH160, 0x14, .., OP_EQUALVERIFY, OP_CHECKSIG] if script.len() == 25 => hash_only(3..23),
        [OP_HASH160, 0x14, .., OP_EQUAL] if script.len() == 23 => hash_only(2..22),
        [0x21, key @ .., OP_CHECKSIG] if key.len() == COMPRESSED_LEN => with_key(key),
        [0x41, key @ .., OP_CHECKSIG] if key.len() == UNCOMPRESSED_LEN => with_key(key),
        [OP_0, 0x14, ..] if script.len() == 22 => hash_only(2..22),
        [OP_0, 0x20, ..] if script.len() == 34 => hash_only(2..34),
        _ => (None, None),
    }
}

/// Extract the public key and its hash160 from a `<sig> <pubkey>` input
/// script.
pub fn guess_pubkey_and_hash_by_in_script(script: &[u8]) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    let (first, used) = parse_push_bytes(script);
    if first.is_none() {
        return (None, None);
    }
    match parse_push_bytes(&script[used..]).0 {
        Some(key) => (Some(key.to_vec()), Some(hash160(key).to_vec())),
        None => (None, None),
    }
}

/// Every table format `key` can produce, in table order.
pub fn get_outs(key: &dyn ScriptKey) -> Vec<Out> {
    let mut s = Script::new(key);
    FORMATS
        .iter()
        .filter_map(|f| match s.out(f.name) {
            Ok(out) => Some(out),
            Err(e) => {
                log::debug!("skipping format {}: {}", f.name, e);
                None
            }
        })
        .collect()
}
