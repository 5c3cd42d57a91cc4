//! Signature hash computation for transaction signing.
//!
//! Two digest algorithms are supported. The legacy one serializes a copy
//! of the transaction with every input script emptied except the one being
//! signed. The BIP-143 one commits to the spent amount and reuses hashes
//! of all outpoints, sequences and outputs, so it is split into a
//! per-transaction [`SegwitPreimage`] and a cheap per-input step.
//!
//! Only the SIGHASH_ALL commitment is implemented. Other flag values are
//! appended to the preimage as given but do not change what is hashed.
//!
//! See <https://github.com/bitcoin/bips/blob/master/bip-0143.mediawiki>

use outscript_primitives::hash::sha256d;
use outscript_primitives::util::WireWriter;

use crate::amount::BtcAmount;
use crate::input::BtcTxInput;
use crate::transaction::BtcTx;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Fork-id replay protection. On P2PKH inputs it selects the BIP-143 digest.
pub const SIGHASH_FORKID: u32 = 0x40;

/// SIGHASH_ALL | SIGHASH_FORKID, the usual flag on Bitcoin Cash.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

// -----------------------------------------------------------------------
// Legacy signature hash
// -----------------------------------------------------------------------

/// Compute the legacy signature hash for input `input_index`.
///
/// # Arguments
/// * `tx`          - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - Output script of the spent output.
/// * `sighash`     - Sighash flags, appended as a 4-byte LE value.
///
/// # Returns
/// The 32-byte double SHA-256 to sign.
pub fn legacy_signature_hash(
    tx: &BtcTx,
    input_index: usize,
    script_code: &[u8],
    sighash: u32,
) -> Result<[u8; 32], TransactionError> {
    let mut wtx = tx.dup();
    wtx.clear_inputs();
    let input = wtx.inputs.get_mut(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;
    input.script = script_code.to_vec();

    let mut buf = wtx.to_bytes_without_witness();
    buf.extend_from_slice(&sighash.to_le_bytes());
    Ok(sha256d(&buf))
}

// -----------------------------------------------------------------------
// BIP-143 signature hash
// -----------------------------------------------------------------------

/// The transaction-wide parts of a BIP-143 preimage.
///
/// | Part    | Contents                                              |
/// |---------|-------------------------------------------------------|
/// | prefix  | version, hashPrevouts, hashSequence                   |
/// | suffix  | hashOutputs, locktime                                 |
///
/// The per-input part between them is the outpoint, the script code,
/// the amount and the sequence.
#[derive(Clone, Debug)]
pub struct SegwitPreimage {
    prefix: Vec<u8>,
    suffix: Vec<u8>,
}

impl SegwitPreimage {
    /// Hash the outpoints, sequences and outputs of `tx`.
    pub fn new(tx: &BtcTx) -> Self {
        let mut prevouts = WireWriter::with_capacity(tx.inputs.len() * 36);
        let mut sequences = WireWriter::with_capacity(tx.inputs.len() * 4);
        for input in &tx.inputs {
            prevouts.write_bytes(&input.outpoint());
            sequences.write_u32_le(input.sequence);
        }
        let mut outputs = WireWriter::new();
        for output in &tx.outputs {
            output.write_to(&mut outputs);
        }

        let mut prefix = WireWriter::with_capacity(68);
        prefix.write_u32_le(tx.version);
        prefix.write_bytes(&sha256d(prevouts.as_bytes()));
        prefix.write_bytes(&sha256d(sequences.as_bytes()));

        let mut suffix = WireWriter::with_capacity(36);
        suffix.write_bytes(&sha256d(outputs.as_bytes()));
        suffix.write_u32_le(tx.locktime);

        SegwitPreimage {
            prefix: prefix.into_bytes(),
            suffix: suffix.into_bytes(),
        }
    }

    /// Build the full preimage for one input.
    pub fn preimage(&self, input: &BtcTxInput, script_code: &[u8], amount: BtcAmount, sighash: u32) -> Vec<u8> {
        let mut w = WireWriter::with_capacity(self.prefix.len() + self.suffix.len() + script_code.len() + 60);
        w.write_bytes(&self.prefix);
        w.write_bytes(&input.outpoint());
        w.write_var_bytes(script_code);
        w.write_u64_le(amount.value());
        w.write_u32_le(input.sequence);
        w.write_bytes(&self.suffix);
        w.write_u32_le(sighash);
        w.into_bytes()
    }

    /// Double SHA-256 of [`SegwitPreimage::preimage`].
    pub fn signature_hash(&self, input: &BtcTxInput, script_code: &[u8], amount: BtcAmount, sighash: u32) -> [u8; 32] {
        sha256d(&self.preimage(input, script_code, amount, sighash))
    }
}
