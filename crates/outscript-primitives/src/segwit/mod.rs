//! Segwit address encoding (BIP-173 Bech32 and BIP-350 Bech32m).
//!
//! Thin wrappers over the `bech32` crate's segwit module that map its
//! errors into [`PrimitivesError`]. Version 0 programs use Bech32, version
//! 1 and above use Bech32m; the checksum variant is chosen by the crate.

use bech32::{Fe32, Hrp};

use crate::PrimitivesError;

/// Encode a witness program as a lowercase segwit address.
///
/// # Arguments
/// * `hrp` - Human-readable prefix, e.g. `bc` or `ltc`.
/// * `version` - Witness version, 0 to 16.
/// * `program` - Witness program bytes.
pub fn encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, PrimitivesError> {
    let hrp = Hrp::parse(hrp).map_err(|e| PrimitivesError::InvalidSegwit(e.to_string()))?;
    let version = Fe32::try_from(version).map_err(|e| PrimitivesError::InvalidSegwit(e.to_string()))?;
    bech32::segwit::encode(hrp, version, program)
        .map_err(|e| PrimitivesError::InvalidSegwit(e.to_string()))
}

/// Decode a segwit address.
///
/// # Returns
/// The lowercase human-readable prefix, the witness version and the
/// witness program.
pub fn decode(addr: &str) -> Result<(String, u8, Vec<u8>), PrimitivesError> {
    let (hrp, version, program) =
        bech32::segwit::decode(addr).map_err(|e| PrimitivesError::InvalidSegwit(e.to_string()))?;
    Ok((hrp.to_lowercase(), version.to_u8(), program))
}
