//! Core transaction type for Bitcoin-derived UTXO chains.
//!
//! Represents a transaction with version, inputs, outputs and locktime,
//! with or without segwit witness data. Supports binary and hex
//! serialization, txid computation, signed-size estimation and the
//! `vin`/`vout` JSON layout used by node RPC interfaces.

use outscript_primitives::hash::sha256d;
use outscript_primitives::hex32::Hex32;
use outscript_primitives::util::{VarInt, WireReader, WireWriter};
use outscript_script::parse_bitcoin_based_address;
use serde::{Deserialize, Serialize};

use crate::amount::BtcAmount;
use crate::input::BtcTxInput;
use crate::output::BtcTxOutput;
use crate::TransactionError;

/// Common surface of a transaction type: wire bytes and a 32-byte id.
pub trait Transaction {
    /// Serialize to the canonical wire form.
    fn to_bytes(&self) -> Vec<u8>;

    /// Parse from wire bytes; the whole slice must be consumed.
    fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError>
    where
        Self: Sized;

    /// The transaction id in display order.
    fn hash(&self) -> [u8; 32];
}

/// Bounds applied while decoding untrusted transaction bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Largest accepted input count.
    pub max_inputs: u64,
    /// Largest accepted output count.
    pub max_outputs: u64,
    /// Largest accepted script or witness item, in bytes.
    pub max_item_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeLimits {
            max_inputs: 10_000,
            max_outputs: 65_536,
            max_item_len: 100_000,
        }
    }
}

/// A transaction on a Bitcoin-derived chain.
///
/// # Wire format
///
/// | Field        | Size                               |
/// |--------------|------------------------------------|
/// | version      | 4 bytes (LE)                       |
/// | marker, flag | `00 01`, only with witness data    |
/// | input count  | VarInt                             |
/// | inputs       | variable (per input)               |
/// | output count | VarInt                             |
/// | outputs      | variable (per output)              |
/// | witnesses    | per input, only with witness data  |
/// | locktime     | 4 bytes (LE)                       |
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtcTx {
    /// Transaction format version.
    pub version: u32,

    /// Ordered list of transaction inputs.
    #[serde(rename = "vin", default)]
    pub inputs: Vec<BtcTxInput>,

    /// Ordered list of transaction outputs.
    #[serde(rename = "vout", default)]
    pub outputs: Vec<BtcTxOutput>,

    /// Lock time, a block height or Unix timestamp.
    pub locktime: u32,
}

impl BtcTx {
    /// Create a new empty transaction with version 1 and locktime 0.
    pub fn new() -> Self {
        BtcTx {
            version: 1,
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes with the default [`DecodeLimits`].
    ///
    /// # Returns
    /// A `TransactionError` if the data is truncated, malformed, exceeds a
    /// limit, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `WireReader` with default limits.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        Self::read_from_with_limits(reader, &DecodeLimits::default())
    }

    /// Deserialize a transaction from a `WireReader`.
    ///
    /// An input count of zero is read as the segwit marker: the flag byte
    /// follows, then the real input count, and each input's witness stack
    /// is read after the outputs.
    ///
    /// # Arguments
    /// * `reader` - Reader positioned at the start of a serialized transaction.
    /// * `limits` - Bounds on counts and item sizes.
    pub fn read_from_with_limits(reader: &mut WireReader, limits: &DecodeLimits) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        let mut input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let segwit = input_count.value() == 0;
        if segwit {
            reader.read_u8().map_err(|e| {
                TransactionError::SerializationError(format!("reading segwit flag: {}", e))
            })?;
            input_count = reader.read_varint().map_err(|e| {
                TransactionError::SerializationError(format!("reading input count: {}", e))
            })?;
        }
        if input_count.value() > limits.max_inputs {
            return Err(TransactionError::SerializationError(format!(
                "input count {} exceeds limit of {}",
                input_count.value(),
                limits.max_inputs
            )));
        }

        let mut inputs = Vec::with_capacity(input_count.value() as usize);
        for _ in 0..input_count.value() {
            inputs.push(BtcTxInput::read_from(reader, limits)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        if output_count.value() > limits.max_outputs {
            return Err(TransactionError::SerializationError(format!(
                "output count {} exceeds limit of {}",
                output_count.value(),
                limits.max_outputs
            )));
        }

        let mut outputs = Vec::with_capacity(output_count.value() as usize);
        for n in 0..output_count.value() as usize {
            let mut output = BtcTxOutput::read_from(reader, limits)?;
            output.n = n;
            outputs.push(output);
        }

        if segwit {
            for input in inputs.iter_mut() {
                input.read_witnesses(reader, limits)?;
            }
        }

        let locktime = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading locktime: {}", e))
        })?;

        Ok(BtcTx {
            version,
            inputs,
            outputs,
            locktime,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize to bytes, including witness data when any input has some.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode(self.has_witness())
    }

    /// Serialize without witness data, the form the txid commits to.
    pub fn to_bytes_without_witness(&self) -> Vec<u8> {
        self.encode(false)
    }

    /// Hex-encode [`BtcTx::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn encode(&self, witness: bool) -> Vec<u8> {
        let mut w = WireWriter::with_capacity(self.compute_size());
        w.write_u32_le(self.version);
        if witness {
            w.write_bytes(&[0x00, 0x01]);
        }
        w.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut w);
        }
        w.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut w);
        }
        if witness {
            for input in &self.inputs {
                input.write_witnesses(&mut w);
            }
        }
        w.write_u32_le(self.locktime);
        w.into_bytes()
    }

    // -----------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------

    /// Double SHA-256 of the non-witness serialization, in display order.
    pub fn hash(&self) -> [u8; 32] {
        let mut h = sha256d(&self.to_bytes_without_witness());
        h.reverse();
        h
    }

    /// The transaction id as a [`Hex32`].
    pub fn txid(&self) -> Hex32 {
        Hex32(self.hash())
    }

    /// The transaction id as lowercase hex.
    pub fn txid_hex(&self) -> String {
        hex::encode(self.hash())
    }

    // -----------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------

    /// A deep copy of this transaction.
    pub fn dup(&self) -> Self {
        self.clone()
    }

    /// Empty every input's script and witness stack.
    pub fn clear_inputs(&mut self) {
        for input in self.inputs.iter_mut() {
            input.script.clear();
            input.witnesses.clear();
        }
    }

    /// Whether any input carries witness items.
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|input| !input.witnesses.is_empty())
    }

    /// Append an input spending `vout` of `txid`.
    pub fn add_input(&mut self, txid: Hex32, vout: u32) {
        self.inputs.push(BtcTxInput::new(txid, vout));
    }

    /// Append an output paying `amount` to `address` on any supported network.
    pub fn add_output(&mut self, address: &str, amount: impl Into<BtcAmount>) -> Result<(), TransactionError> {
        self.add_net_output(outscript_script::AUTO, address, amount)
    }

    /// Append an output paying `amount` to `address` on `network`.
    ///
    /// # Returns
    /// A `Script` error if the address does not parse for that network.
    pub fn add_net_output(
        &mut self,
        network: &str,
        address: &str,
        amount: impl Into<BtcAmount>,
    ) -> Result<(), TransactionError> {
        let out = parse_bitcoin_based_address(network, address)?;
        self.outputs.push(BtcTxOutput {
            amount: amount.into(),
            n: self.outputs.len(),
            script: out.bytes().to_vec(),
        });
        Ok(())
    }

    // -----------------------------------------------------------------
    // Size
    // -----------------------------------------------------------------

    /// Estimated size in virtual bytes.
    ///
    /// The non-witness serialization counts in full. Witness bytes, plus
    /// the two marker bytes, count for a quarter rounded up, and only when
    /// some input has witness items. Run [`BtcTxInput::prefill`] on each
    /// input first to estimate an unsigned transaction.
    pub fn compute_size(&self) -> usize {
        let base = 4
            + VarInt::from(self.inputs.len()).length()
            + VarInt::from(self.outputs.len()).length()
            + 4
            + self.inputs.iter().map(BtcTxInput::compute_size).sum::<usize>()
            + self.outputs.iter().map(BtcTxOutput::compute_size).sum::<usize>();
        if !self.has_witness() {
            return base;
        }
        let witness = 2 + self.inputs.iter().map(BtcTxInput::compute_witness_size).sum::<usize>();
        base + witness.div_ceil(4)
    }
}

impl Transaction for BtcTx {
    fn to_bytes(&self) -> Vec<u8> {
        BtcTx::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        BtcTx::from_bytes(bytes)
    }

    fn hash(&self) -> [u8; 32] {
        BtcTx::hash(self)
    }
}
