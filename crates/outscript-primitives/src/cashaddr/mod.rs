//! CashAddr address encoding used by Bitcoin Cash.
//!
//! A CashAddr string is `prefix:payload`, where the payload is a base32
//! rendering of a version byte, the hash, and a 40-bit BCH checksum that
//! also commits to the prefix. The version byte packs the address type
//! (0 for key hash, 1 for script hash) with a hash-size code.

use crate::PrimitivesError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CHECKSUM_LEN: usize = 8;
const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Address type for a public-key-hash payload.
pub const TYPE_P2KH: u8 = 0;
/// Address type for a script-hash payload.
pub const TYPE_P2SH: u8 = 1;

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        for (i, g) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= g;
            }
        }
    }
    c ^ 1
}

fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

fn size_code(len: usize) -> Option<u8> {
    match len {
        20 => Some(0),
        24 => Some(1),
        28 => Some(2),
        32 => Some(3),
        40 => Some(4),
        48 => Some(5),
        56 => Some(6),
        64 => Some(7),
        _ => None,
    }
}

/// Regroup bits. With `pad` unset, leftover bits must be fewer than
/// `from` and all zero.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max = (1u32 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &v in data {
        if (v as u32) >> from != 0 {
            return None;
        }
        acc = (acc << from) | v as u32;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return None;
    }
    Some(out)
}

/// Encode `payload` as a CashAddr string carrying `prefix`.
///
/// # Arguments
/// * `prefix` - Network prefix without the colon, e.g. `bitcoincash`.
/// * `kind` - Address type, [`TYPE_P2KH`] or [`TYPE_P2SH`].
/// * `payload` - Hash bytes; the length must be a valid CashAddr size.
pub fn encode(prefix: &str, kind: u8, payload: &[u8]) -> Result<String, PrimitivesError> {
    let code = size_code(payload.len()).ok_or_else(|| {
        PrimitivesError::InvalidCashAddr(format!("unsupported payload length {}", payload.len()))
    })?;
    if kind > 0x0f {
        return Err(PrimitivesError::InvalidCashAddr(format!("invalid type {}", kind)));
    }
    let prefix = prefix.to_ascii_lowercase();

    let mut raw = Vec::with_capacity(payload.len() + 1);
    raw.push(kind << 3 | code);
    raw.extend_from_slice(payload);
    let mut data = convert_bits(&raw, 8, 5, true)
        .ok_or_else(|| PrimitivesError::InvalidCashAddr("bit conversion failed".to_string()))?;

    let poly = polymod(
        prefix_values(&prefix)
            .chain(data.iter().copied())
            .chain(std::iter::repeat(0).take(CHECKSUM_LEN)),
    );
    for i in 0..CHECKSUM_LEN {
        data.push(((poly >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8);
    }

    let mut out = String::with_capacity(prefix.len() + 1 + data.len());
    out.push_str(&prefix);
    out.push(':');
    out.extend(data.iter().map(|&v| CHARSET[v as usize] as char));
    Ok(out)
}

/// Decode a CashAddr string that must carry `prefix`.
///
/// Uppercase input is accepted, mixed case is not.
///
/// # Returns
/// The address type and the hash payload.
pub fn decode(prefix: &str, addr: &str) -> Result<(u8, Vec<u8>), PrimitivesError> {
    let has_lower = addr.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = addr.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(PrimitivesError::InvalidCashAddr("mixed case".to_string()));
    }
    let addr = addr.to_ascii_lowercase();
    let prefix = prefix.to_ascii_lowercase();

    let body = addr
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| PrimitivesError::InvalidCashAddr(format!("missing {} prefix", prefix)))?;

    let values = body
        .bytes()
        .map(|c| CHARSET.iter().position(|&x| x == c).map(|p| p as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| PrimitivesError::InvalidCashAddr("invalid character".to_string()))?;
    if values.len() <= CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidCashAddr("too short".to_string()));
    }
    if polymod(prefix_values(&prefix).chain(values.iter().copied())) != 0 {
        return Err(PrimitivesError::ChecksumMismatch);
    }

    let data = &values[..values.len() - CHECKSUM_LEN];
    let raw = convert_bits(data, 5, 8, false)
        .ok_or_else(|| PrimitivesError::InvalidCashAddr("invalid padding".to_string()))?;
    let (&version, payload) = raw
        .split_first()
        .ok_or_else(|| PrimitivesError::InvalidCashAddr("empty payload".to_string()))?;
    if version & 0x80 != 0 {
        return Err(PrimitivesError::InvalidCashAddr("reserved version bit set".to_string()));
    }
    if size_code(payload.len()) != Some(version & 0x07) {
        return Err(PrimitivesError::InvalidCashAddr(format!(
            "payload length {} does not match size code {}",
            payload.len(),
            version & 0x07
        )));
    }
    Ok((version >> 3, payload.to_vec()))
}
