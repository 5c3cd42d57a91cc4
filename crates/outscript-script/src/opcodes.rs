//! Opcode byte values emitted or recognized by the script formats.

/// Push an empty byte string; also the segwit v0 witness version.
pub const OP_0: u8 = 0x00;
/// Largest direct push length opcode.
pub const OP_DATA_75: u8 = 0x4b;
/// Next byte holds the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes (little-endian) hold the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes (little-endian) hold the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number 1; also the segwit v1 (taproot) witness version.
pub const OP_1: u8 = 0x51;
/// Marks an output as a provably unspendable data carrier.
pub const OP_RETURN: u8 = 0x6a;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Compare the top two stack items.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL followed by OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Hash160 of the top stack item.
pub const OP_HASH160: u8 = 0xa9;
/// Check a signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
