//! Transaction input referencing a previous output.
//!
//! Holds the spent outpoint, the input script (scriptSig), the sequence
//! number and the witness stack. The witness stack is serialized by the
//! enclosing transaction, after all outputs, so [`BtcTxInput::write_to`]
//! only emits the non-witness part.

use outscript_primitives::ec::public_key::{COMPRESSED_LEN, UNCOMPRESSED_LEN};
use outscript_primitives::hex32::Hex32;
use outscript_primitives::util::{VarInt, WireReader, WireWriter};
use outscript_script::push_bytes;
use serde::{Deserialize, Serialize};

use crate::sign::SignScheme;
use crate::transaction::DecodeLimits;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// Length of the placeholder signature written by [`BtcTxInput::prefill`].
///
/// 71 bytes of DER plus the sighash byte, the largest a low-S signature gets.
pub const PREFILL_SIG_LEN: usize = 72;

/// Length of a P2PKH script, as found in a P2WSH witness script slot.
const P2PKH_SCRIPT_LEN: usize = 25;

/// A single input in a transaction.
///
/// # Wire format (non-witness part)
///
/// | Field    | Size                    |
/// |----------|-------------------------|
/// | txid     | 32 bytes (wire order)   |
/// | vout     | 4 bytes (LE)            |
/// | script   | VarInt length + bytes   |
/// | sequence | 4 bytes (LE)            |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "InputJson", try_from = "InputJson")]
pub struct BtcTxInput {
    /// Id of the transaction being spent, in display order.
    pub txid: Hex32,

    /// Index of the spent output within that transaction.
    pub vout: u32,

    /// The input script (scriptSig). Empty for native segwit spends.
    pub script: Vec<u8>,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Witness stack items, empty for legacy spends.
    pub witnesses: Vec<Vec<u8>>,
}

impl Default for BtcTxInput {
    fn default() -> Self {
        BtcTxInput {
            txid: Hex32::default(),
            vout: 0,
            script: Vec::new(),
            sequence: DEFAULT_SEQUENCE_NUMBER,
            witnesses: Vec::new(),
        }
    }
}

impl BtcTxInput {
    /// Create an unsigned input spending `vout` of `txid`.
    pub fn new(txid: Hex32, vout: u32) -> Self {
        BtcTxInput {
            txid,
            vout,
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------
    // Wire format
    // -----------------------------------------------------------------

    /// Read the non-witness part of an input.
    ///
    /// # Arguments
    /// * `reader` - Reader positioned at the start of the input.
    /// * `limits` - Bounds applied to the script length.
    pub fn read_from(reader: &mut WireReader, limits: &DecodeLimits) -> Result<Self, TransactionError> {
        let txid = reader.read_array::<32>().map_err(|e| {
            TransactionError::SerializationError(format!("reading input txid: {}", e))
        })?;
        let vout = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading input vout: {}", e))
        })?;
        let script = reader.read_var_bytes(limits.max_item_len).map_err(|e| {
            TransactionError::SerializationError(format!("reading input script: {}", e))
        })?;
        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading input sequence: {}", e))
        })?;

        Ok(BtcTxInput {
            txid: Hex32::from_wire(txid),
            vout,
            script,
            sequence,
            witnesses: Vec::new(),
        })
    }

    /// Read this input's witness stack.
    pub(crate) fn read_witnesses(&mut self, reader: &mut WireReader, limits: &DecodeLimits) -> Result<(), TransactionError> {
        let count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading witness count: {}", e))
        })?;
        // every item takes at least one byte, so a bogus count runs out of input
        let mut witnesses = Vec::new();
        for _ in 0..count.value() {
            let item = reader.read_var_bytes(limits.max_item_len).map_err(|e| {
                TransactionError::SerializationError(format!("reading witness item: {}", e))
            })?;
            witnesses.push(item);
        }
        self.witnesses = witnesses;
        Ok(())
    }

    /// Append the non-witness part of this input to `w`.
    pub fn write_to(&self, w: &mut WireWriter) {
        w.write_bytes(&self.outpoint());
        w.write_var_bytes(&self.script);
        w.write_u32_le(self.sequence);
    }

    /// Append this input's witness stack to `w`.
    pub(crate) fn write_witnesses(&self, w: &mut WireWriter) {
        w.write_varint(VarInt::from(self.witnesses.len()));
        for item in &self.witnesses {
            w.write_var_bytes(item);
        }
    }

    /// The 36-byte outpoint: wire-order txid followed by the LE vout.
    pub fn outpoint(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(&self.txid.reversed());
        out[32..].copy_from_slice(&self.vout.to_le_bytes());
        out
    }

    // -----------------------------------------------------------------
    // Size estimation
    // -----------------------------------------------------------------

    /// Serialized size of the non-witness part.
    pub fn compute_size(&self) -> usize {
        32 + 4 + VarInt::from(self.script.len()).length() + self.script.len() + 4
    }

    /// Serialized size of the witness stack, count prefix included.
    pub fn compute_witness_size(&self) -> usize {
        VarInt::from(self.witnesses.len()).length()
            + self
                .witnesses
                .iter()
                .map(|item| VarInt::from(item.len()).length() + item.len())
                .sum::<usize>()
    }

    /// Fill the script and witness stack with zero placeholders the size
    /// of a real signature for `scheme`.
    ///
    /// Lets [`crate::BtcTx::compute_size`] estimate the signed size before
    /// any key is at hand. Witness-only schemes leave the script empty.
    ///
    /// # Returns
    /// `UnsupportedScheme` if `scheme` is not a known sign scheme.
    pub fn prefill(&mut self, scheme: &str) -> Result<(), TransactionError> {
        let scheme: SignScheme = scheme.parse()?;
        let sig = vec![0u8; PREFILL_SIG_LEN];
        let comp = vec![0u8; COMPRESSED_LEN];
        let uncomp = vec![0u8; UNCOMPRESSED_LEN];
        let legacy = |key: &[u8]| {
            let mut script = push_bytes(&sig);
            script.extend_from_slice(&push_bytes(key));
            script
        };

        let (script, witnesses) = match scheme {
            SignScheme::P2pk => (push_bytes(&sig), Vec::new()),
            SignScheme::P2pkh => (legacy(&comp), Vec::new()),
            SignScheme::P2pukh => (legacy(&uncomp), Vec::new()),
            SignScheme::P2wpkh => (Vec::new(), vec![sig, comp]),
            SignScheme::P2shP2wpkh => {
                let mut program = vec![0x00, 0x14];
                program.extend_from_slice(&[0u8; 20]);
                (push_bytes(&program), vec![sig, comp])
            }
            // <key> OP_CHECKSIG
            SignScheme::P2wshP2pk => (Vec::new(), vec![sig, vec![0u8; COMPRESSED_LEN + 2]]),
            SignScheme::P2wshP2puk => (Vec::new(), vec![sig, vec![0u8; UNCOMPRESSED_LEN + 2]]),
            SignScheme::P2wsh | SignScheme::P2wshP2pkh => {
                (Vec::new(), vec![sig, comp, vec![0u8; P2PKH_SCRIPT_LEN]])
            }
            SignScheme::P2wshP2pukh => (Vec::new(), vec![sig, uncomp, vec![0u8; P2PKH_SCRIPT_LEN]]),
        };

        self.script = script;
        self.witnesses = witnesses;
        Ok(())
    }
}

// -----------------------------------------------------------------------
// JSON representation
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScriptHex {
    #[serde(default)]
    hex: String,
}

#[derive(Serialize, Deserialize)]
struct InputJson {
    txid: Hex32,
    vout: u32,
    #[serde(rename = "scriptSig", default)]
    script_sig: ScriptHex,
    sequence: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    witnesses: Vec<String>,
}

impl From<BtcTxInput> for InputJson {
    fn from(input: BtcTxInput) -> Self {
        InputJson {
            txid: input.txid,
            vout: input.vout,
            script_sig: ScriptHex {
                hex: hex::encode(&input.script),
            },
            sequence: input.sequence,
            witnesses: input.witnesses.iter().map(hex::encode).collect(),
        }
    }
}

impl TryFrom<InputJson> for BtcTxInput {
    type Error = TransactionError;

    fn try_from(json: InputJson) -> Result<Self, Self::Error> {
        let decode = |s: &str| {
            hex::decode(s).map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))
        };
        Ok(BtcTxInput {
            txid: json.txid,
            vout: json.vout,
            script: decode(&json.script_sig.hex)?,
            sequence: json.sequence,
            witnesses: json.witnesses.iter().map(|w| decode(w)).collect::<Result<_, _>>()?,
        })
    }
}
