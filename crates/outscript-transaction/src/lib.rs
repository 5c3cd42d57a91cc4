/// outscript transaction layer - wire codec, size estimation and signing.
///
/// Provides the BtcTx type with inputs, outputs and witness data, legacy
/// and BIP-143 signature hashes, an input signer for the common UTXO
/// spending schemes, and the `vin`/`vout` JSON layout.

pub mod amount;
pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;
pub mod sign;

mod error;
pub use error::TransactionError;
pub use amount::BtcAmount;
pub use transaction::{BtcTx, DecodeLimits, Transaction};
pub use input::BtcTxInput;
pub use output::BtcTxOutput;
pub use sign::{BtcTxSign, DigestSigner, SignScheme};
