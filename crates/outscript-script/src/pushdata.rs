//! Script push-data encoding.
//!
//! A push is the script encoding of a literal byte string. Short payloads
//! carry their length in the opcode byte itself; longer payloads use
//! OP_PUSHDATA1/2/4 with a 1, 2 or 4 byte little-endian length.

use crate::opcodes::*;

/// Encode `data` as a single script push using the shortest form.
///
/// Payloads above `u32::MAX` bytes cannot be represented in a script.
pub fn push_bytes(data: &[u8]) -> Vec<u8> {
    let len = data.len();
    let mut out = Vec::with_capacity(len + 5);
    if len <= OP_DATA_75 as usize {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(OP_PUSHDATA1);
        out.push(len as u8);
    } else if len <= 0xffff {
        out.push(OP_PUSHDATA2);
        out.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        out.push(OP_PUSHDATA4);
        out.extend_from_slice(&(len as u32).to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

/// Decode the push at the start of `script`.
///
/// # Returns
/// The pushed bytes and the total number of bytes the push occupies.
/// `(None, 0)` is returned for empty input, a truncated length field,
/// a truncated payload, or a first byte that is not a push opcode.
/// Zero-length pushes (`OP_0`) yield `Some(&[])`.
pub fn parse_push_bytes(script: &[u8]) -> (Option<&[u8]>, usize) {
    let Some((&op, rest)) = script.split_first() else {
        return (None, 0);
    };
    let (len, header) = match op {
        0..=OP_DATA_75 => (op as usize, 1usize),
        OP_PUSHDATA1 => match rest.first() {
            Some(&l) => (l as usize, 2),
            None => return (None, 0),
        },
        OP_PUSHDATA2 => match rest.get(..2) {
            Some(l) => (u16::from_le_bytes([l[0], l[1]]) as usize, 3),
            None => return (None, 0),
        },
        OP_PUSHDATA4 => match rest.get(..4) {
            Some(l) => (u32::from_le_bytes([l[0], l[1], l[2], l[3]]) as usize, 5),
            None => return (None, 0),
        },
        _ => return (None, 0),
    };
    match header
        .checked_add(len)
        .and_then(|end| script.get(header..end))
    {
        Some(data) => (Some(data), header + len),
        None => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // push_bytes / parse_push_bytes round trips
    // -----------------------------------------------------------------------

    /// Every boundary length round-trips and picks the expected opcode.
    #[test]
    fn test_push_roundtrip_boundaries() {
        let cases: [(usize, u8, usize); 9] = [
            (0, 0x00, 1),
            (1, 0x01, 1),
            (75, 0x4b, 1),
            (76, OP_PUSHDATA1, 2),
            (255, OP_PUSHDATA1, 2),
            (256, OP_PUSHDATA2, 3),
            (65535, OP_PUSHDATA2, 3),
            (65536, OP_PUSHDATA4, 5),
            (70000, OP_PUSHDATA4, 5),
        ];
        for (len, op, header) in cases {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let pushed = push_bytes(&data);
            assert_eq!(pushed[0], op, "opcode for length {}", len);
            assert_eq!(pushed.len(), header + len, "encoded size for length {}", len);
            let (parsed, used) = parse_push_bytes(&pushed);
            assert_eq!(parsed, Some(&data[..]), "payload for length {}", len);
            assert_eq!(used, pushed.len(), "consumed for length {}", len);
        }
    }

    /// Only the first push is consumed when more script follows.
    #[test]
    fn test_parse_push_with_trailing_bytes() {
        let script = hex::decode("0201028877").expect("valid hex");
        let (data, used) = parse_push_bytes(&script);
        assert_eq!(data, Some(&[0x01, 0x02][..]));
        assert_eq!(used, 3);
    }

    // -----------------------------------------------------------------------
    // malformed input
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_push_malformed() {
        assert_eq!(parse_push_bytes(&[]), (None, 0));
        // direct push longer than the script
        assert_eq!(parse_push_bytes(&[0x05, 0x01]), (None, 0));
        // PUSHDATA opcodes with missing or short length bytes
        assert_eq!(parse_push_bytes(&[OP_PUSHDATA1]), (None, 0));
        assert_eq!(parse_push_bytes(&[OP_PUSHDATA2, 0x01]), (None, 0));
        assert_eq!(parse_push_bytes(&[OP_PUSHDATA4, 0x01, 0x00, 0x00]), (None, 0));
        // payload shorter than declared
        assert_eq!(parse_push_bytes(&[OP_PUSHDATA1, 0x03, 0xaa]), (None, 0));
        assert_eq!(parse_push_bytes(&[OP_PUSHDATA4, 0xff, 0xff, 0xff, 0xff, 0x00]), (None, 0));
        // not a push opcode
        assert_eq!(parse_push_bytes(&[OP_DUP, 0x01]), (None, 0));
    }
}
