/// outscript script layer: output script synthesis, addresses and guessing.
///
/// Derives every standard output script a public key can be paid to from a
/// static format table, renders and parses addresses for Bitcoin-derived
/// and EVM networks, and classifies existing scripts.

pub mod opcodes;
pub mod pushdata;
pub mod key;
pub mod insertable;
pub mod format;
pub mod script;
pub mod out;
pub mod address;
pub mod eip55;
pub mod guess;

mod error;
pub use error::ScriptError;
pub use address::{parse_bitcoin_address, parse_bitcoin_based_address, parse_evm_address, Network, NetworkParams, AUTO};
pub use eip55::eip55;
pub use format::{Format, FORMATS};
pub use guess::{get_outs, guess_out, guess_pubkey_and_hash_by_in_script, guess_pubkey_and_hash_by_out_script};
pub use insertable::Insertable;
pub use key::{Ed25519Key, KeyEncoding, ScriptKey};
pub use out::Out;
pub use pushdata::{parse_push_bytes, push_bytes};
pub use script::Script;
