//! EIP-55 mixed-case checksum encoding for EVM addresses.

use outscript_primitives::hash::keccak256;

/// Encode `bytes` as `0x`-prefixed hex with the EIP-55 checksum casing.
///
/// A hex letter is uppercased when the matching nibble of
/// `keccak256(lowercase_hex)` is greater than 7.
pub fn eip55(bytes: &[u8]) -> String {
    let lower = hex::encode(bytes);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(lower.len() + 2);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble > 7 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eip55_vectors() {
        // published EIP-55 examples
        for addr in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let raw = hex::decode(&addr[2..]).unwrap();
            assert_eq!(eip55(&raw), addr);
        }
    }

    #[test]
    fn test_eip55_key_address() {
        let raw = hex::decode("2aeb8add8337360e088b7d9ce4e857b9be60f3a7").unwrap();
        assert_eq!(eip55(&raw), "0x2AeB8ADD8337360E088B7D9ce4e857b9BE60f3a7");
    }
}
