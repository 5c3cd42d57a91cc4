#![deny(missing_docs)]

//! outscript - output scripts, addresses and transactions for UTXO networks.
//!
//! Re-exports all workspace components for convenient single-crate usage.

pub use outscript_primitives as primitives;
pub use outscript_script as script;
pub use outscript_transaction as transaction;

pub use outscript_script::{
    get_outs, guess_out, parse_bitcoin_based_address, parse_evm_address, Out, Script,
};
pub use outscript_transaction::{
    BtcAmount, BtcTx, BtcTxInput, BtcTxOutput, BtcTxSign, DigestSigner, SignScheme, Transaction,
};
