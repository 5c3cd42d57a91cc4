//! Transaction output: an amount locked to an output script.

use outscript_primitives::util::{WireReader, WireWriter, VarInt};
use outscript_script::guess_out;
use serde::{Deserialize, Serialize};

use crate::amount::BtcAmount;
use crate::transaction::DecodeLimits;
use crate::TransactionError;

/// A single output in a transaction.
///
/// `n` is the output's position in the transaction. It is not part of the
/// wire format; decoding and [`crate::BtcTx::add_output`] fill it in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutputJson", try_from = "OutputJson")]
pub struct BtcTxOutput {
    /// Amount in base units.
    pub amount: BtcAmount,

    /// Index of this output within its transaction.
    pub n: usize,

    /// The output script (scriptPubKey).
    pub script: Vec<u8>,
}

impl BtcTxOutput {
    /// Create an output paying `amount` to `script`.
    pub fn new(amount: impl Into<BtcAmount>, script: Vec<u8>) -> Self {
        BtcTxOutput {
            amount: amount.into(),
            n: 0,
            script,
        }
    }

    /// Read an output from its wire form; `n` is left at zero.
    pub fn read_from(reader: &mut WireReader, limits: &DecodeLimits) -> Result<Self, TransactionError> {
        let amount = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output amount: {}", e))
        })?;
        let script = reader.read_var_bytes(limits.max_item_len).map_err(|e| {
            TransactionError::SerializationError(format!("reading output script: {}", e))
        })?;
        Ok(BtcTxOutput {
            amount: BtcAmount(amount),
            n: 0,
            script,
        })
    }

    /// Append the wire form (amount then script) to `w`.
    pub fn write_to(&self, w: &mut WireWriter) {
        w.write_u64_le(self.amount.value());
        w.write_var_bytes(&self.script);
    }

    /// Serialized size in bytes.
    pub fn compute_size(&self) -> usize {
        8 + VarInt::from(self.script.len()).length() + self.script.len()
    }
}

// -----------------------------------------------------------------------
// JSON representation
// -----------------------------------------------------------------------

#[derive(Default, Serialize, Deserialize)]
struct ScriptPubKeyJson {
    #[serde(default)]
    hex: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    addresses: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct OutputJson {
    value: BtcAmount,
    #[serde(default)]
    n: usize,
    #[serde(rename = "scriptPubKey", default)]
    script_pub_key: ScriptPubKeyJson,
}

impl From<BtcTxOutput> for OutputJson {
    fn from(output: BtcTxOutput) -> Self {
        let out = guess_out(&output.script, None);
        OutputJson {
            value: output.amount,
            n: output.n,
            script_pub_key: ScriptPubKeyJson {
                hex: hex::encode(&output.script),
                kind: out.name().to_string(),
                addresses: out.address(&[]).into_iter().collect(),
            },
        }
    }
}

impl TryFrom<OutputJson> for BtcTxOutput {
    type Error = TransactionError;

    fn try_from(json: OutputJson) -> Result<Self, Self::Error> {
        let script = hex::decode(&json.script_pub_key.hex)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Ok(BtcTxOutput {
            amount: json.value,
            n: json.n,
            script,
        })
    }
}
