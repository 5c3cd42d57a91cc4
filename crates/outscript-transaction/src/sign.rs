//! Input signing.
//!
//! [`BtcTx::sign`] takes one [`BtcTxSign`] per input, computes the digest
//! the input's scheme calls for and places the signature and key material
//! in the script or witness stack.

use std::fmt;
use std::str::FromStr;

use outscript_primitives::ec::{PrivateKey, PublicKey};
use outscript_script::{push_bytes, Script};

use crate::amount::BtcAmount;
use crate::sighash::{self, SegwitPreimage, SIGHASH_ALL, SIGHASH_FORKID};
use crate::transaction::BtcTx;
use crate::TransactionError;

/// Something that holds a secp256k1 key and signs 32-byte digests.
pub trait DigestSigner {
    /// The public key matching the signing key.
    fn public_key(&self) -> PublicKey;

    /// Sign `digest`, returning a DER-encoded low-S signature.
    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, TransactionError>;
}

impl DigestSigner for PrivateKey {
    fn public_key(&self) -> PublicKey {
        self.pub_key()
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, TransactionError> {
        let sig = self
            .sign(digest)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(sig.to_der())
    }
}

/// How an input is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignScheme {
    P2pk,
    P2pkh,
    P2pukh,
    P2wpkh,
    P2shP2wpkh,
    /// P2WSH with the witness script detected from the input's current script.
    P2wsh,
    P2wshP2pk,
    P2wshP2puk,
    P2wshP2pkh,
    P2wshP2pukh,
}

/// Candidates for bare `p2wsh`, in detection order.
const P2WSH_CANDIDATES: [SignScheme; 4] = [
    SignScheme::P2wshP2pkh,
    SignScheme::P2wshP2pukh,
    SignScheme::P2wshP2pk,
    SignScheme::P2wshP2puk,
];

impl SignScheme {
    /// Every scheme, in the order they are documented.
    pub const ALL: [SignScheme; 10] = [
        SignScheme::P2pk,
        SignScheme::P2pkh,
        SignScheme::P2pukh,
        SignScheme::P2wpkh,
        SignScheme::P2shP2wpkh,
        SignScheme::P2wsh,
        SignScheme::P2wshP2pk,
        SignScheme::P2wshP2puk,
        SignScheme::P2wshP2pkh,
        SignScheme::P2wshP2pukh,
    ];

    /// The scheme's name, which for every scheme but `p2wsh` is also the
    /// name of the output format it spends.
    pub fn name(self) -> &'static str {
        match self {
            SignScheme::P2pk => "p2pk",
            SignScheme::P2pkh => "p2pkh",
            SignScheme::P2pukh => "p2pukh",
            SignScheme::P2wpkh => "p2wpkh",
            SignScheme::P2shP2wpkh => "p2sh:p2wpkh",
            SignScheme::P2wsh => "p2wsh",
            SignScheme::P2wshP2pk => "p2wsh:p2pk",
            SignScheme::P2wshP2puk => "p2wsh:p2puk",
            SignScheme::P2wshP2pkh => "p2wsh:p2pkh",
            SignScheme::P2wshP2pukh => "p2wsh:p2pukh",
        }
    }
}

impl fmt::Display for SignScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignScheme {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| TransactionError::UnsupportedScheme(s.to_string()))
    }
}

/// Signing instructions for one input.
pub struct BtcTxSign<'a> {
    /// Key the input is signed with.
    pub key: &'a dyn DigestSigner,
    /// How the input is spent.
    pub scheme: SignScheme,
    /// Amount of the spent output; BIP-143 digests commit to it.
    pub amount: BtcAmount,
    /// Sighash flags; zero means [`SIGHASH_ALL`].
    pub sighash: u32,
}

impl<'a> BtcTxSign<'a> {
    /// Sign with `key` using the scheme named `scheme`, zero amount and
    /// default flags.
    pub fn new(key: &'a dyn DigestSigner, scheme: &str) -> Result<Self, TransactionError> {
        Ok(BtcTxSign {
            key,
            scheme: scheme.parse()?,
            amount: BtcAmount::default(),
            sighash: 0,
        })
    }

    pub fn with_amount(mut self, amount: impl Into<BtcAmount>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_sighash(mut self, sighash: u32) -> Self {
        self.sighash = sighash;
        self
    }
}

/// Pick the P2WSH witness script whose P2WSH output matches `current`.
fn detect_p2wsh(current: &[u8], script: &mut Script<'_>) -> SignScheme {
    P2WSH_CANDIDATES
        .into_iter()
        .find(|candidate| {
            script
                .generate(candidate.name())
                .is_ok_and(|generated| generated == current)
        })
        .unwrap_or(SignScheme::P2wshP2pkh)
}

/// DER signature followed by the sighash byte.
fn signature(signer: &dyn DigestSigner, digest: &[u8; 32], sighash: u32) -> Result<Vec<u8>, TransactionError> {
    let mut sig = signer.sign_digest(digest)?;
    sig.push(sighash as u8);
    Ok(sig)
}

impl BtcTx {
    /// Sign every input.
    ///
    /// `keys[n]` describes how input `n` is spent. Legacy schemes write
    /// the signature to the input script. Segwit schemes write it to the
    /// witness stack, leaving the script empty except for `p2sh:p2wpkh`
    /// which carries the redeem script push.
    ///
    /// # Returns
    /// `InvalidTransaction` unless there is exactly one entry per input and
    /// at least one input.
    pub fn sign(&mut self, keys: &[BtcTxSign<'_>]) -> Result<(), TransactionError> {
        if self.inputs.is_empty() {
            return Err(TransactionError::InvalidTransaction(
                "cannot sign a transaction without inputs".to_string(),
            ));
        }
        if keys.len() != self.inputs.len() {
            return Err(TransactionError::InvalidTransaction(format!(
                "{} signing keys for {} inputs",
                keys.len(),
                self.inputs.len()
            )));
        }

        let mut segwit: Option<SegwitPreimage> = None;

        for (n, k) in keys.iter().enumerate() {
            let pubkey = k.key.public_key();
            let mut script = Script::new(&pubkey);
            let sighash = if k.sighash == 0 { SIGHASH_ALL } else { k.sighash };
            let scheme = match k.scheme {
                SignScheme::P2wsh => detect_p2wsh(&self.inputs[n].script, &mut script),
                other => other,
            };
            log::debug!("signing input {} as {} with sighash 0x{:02x}", n, scheme, sighash);

            match scheme {
                SignScheme::P2pk => {
                    let prev = script.generate("p2pk")?;
                    let digest = sighash::legacy_signature_hash(self, n, &prev, sighash)?;
                    let sig = signature(k.key, &digest, sighash)?;
                    self.inputs[n].script = push_bytes(&sig);
                }
                SignScheme::P2pkh | SignScheme::P2pukh => {
                    let prev = script.generate(scheme.name())?;
                    let digest = if sighash & SIGHASH_FORKID != 0 {
                        segwit
                            .get_or_insert_with(|| SegwitPreimage::new(self))
                            .signature_hash(&self.inputs[n], &prev, k.amount, sighash)
                    } else {
                        sighash::legacy_signature_hash(self, n, &prev, sighash)?
                    };
                    let sig = signature(k.key, &digest, sighash)?;
                    let key_bytes = if scheme == SignScheme::P2pkh {
                        script.generate("pubkey:comp")?
                    } else {
                        script.generate("pubkey:uncomp")?
                    };
                    let mut unlocking = push_bytes(&sig);
                    unlocking.extend_from_slice(&push_bytes(&key_bytes));
                    self.inputs[n].script = unlocking;
                }
                SignScheme::P2wpkh | SignScheme::P2shP2wpkh => {
                    let code = script.generate("p2pkh")?;
                    let digest = segwit
                        .get_or_insert_with(|| SegwitPreimage::new(self))
                        .signature_hash(&self.inputs[n], &code, k.amount, sighash);
                    let sig = signature(k.key, &digest, sighash)?;
                    let key_bytes = script.generate("pubkey:comp")?;
                    self.inputs[n].script = if scheme == SignScheme::P2shP2wpkh {
                        push_bytes(&script.generate("p2wpkh")?)
                    } else {
                        Vec::new()
                    };
                    self.inputs[n].witnesses = vec![sig, key_bytes];
                }
                SignScheme::P2wsh
                | SignScheme::P2wshP2pk
                | SignScheme::P2wshP2puk
                | SignScheme::P2wshP2pkh
                | SignScheme::P2wshP2pukh => {
                    let (inner, key_format) = match scheme {
                        SignScheme::P2wshP2pk => ("p2pk", None),
                        SignScheme::P2wshP2puk => ("p2puk", None),
                        SignScheme::P2wshP2pukh => ("p2pukh", Some("pubkey:uncomp")),
                        _ => ("p2pkh", Some("pubkey:comp")),
                    };
                    let witness_script = script.generate(inner)?;
                    let digest = segwit
                        .get_or_insert_with(|| SegwitPreimage::new(self))
                        .signature_hash(&self.inputs[n], &witness_script, k.amount, sighash);
                    let mut witnesses = vec![signature(k.key, &digest, sighash)?];
                    if let Some(format) = key_format {
                        witnesses.push(script.generate(format)?);
                    }
                    witnesses.push(witness_script);
                    self.inputs[n].script = Vec::new();
                    self.inputs[n].witnesses = witnesses;
                }
            }
        }
        Ok(())
    }
}
