//! Wire-format integers and a cursor reader/writer pair.
//!
//! [`VarInt`] is the self-describing length prefix used everywhere in the
//! UTXO transaction format. [`WireReader`] and [`WireWriter`] read and
//! append little-endian integers, varints and length-prefixed buffers.
//! Every read is bounds-checked and reports [`PrimitivesError::UnexpectedEof`]
//! instead of indexing past the end of its input.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A variable-length integer as used in UTXO transactions.
///
/// Values up to `0xfc` take one byte. Larger values are tagged with
/// `0xfd`, `0xfe` or `0xff` followed by a 2, 4 or 8 byte little-endian
/// payload. Encoding always produces the shortest form; decoding accepts
/// any of the four forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the start of `data`.
    ///
    /// # Returns
    /// The decoded value and the number of bytes consumed, or
    /// `UnexpectedEof` when `data` is shorter than the encoding requires.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = WireReader::new(data);
        let v = reader.read_varint()?;
        Ok((v, reader.position()))
    }

    /// Return the wire-format byte length of this VarInt: 1, 3, 5 or 9.
    pub fn length(&self) -> usize {
        match self.0 {
            0..=0xfc => 1,
            0xfd..=0xffff => 3,
            0x1_0000..=0xffff_ffff => 5,
            _ => 9,
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length());
        self.append_to(&mut buf);
        buf
    }

    /// Append the encoded VarInt to `buf`.
    pub fn append_to(&self, buf: &mut Vec<u8>) {
        let v = self.0;
        match self.length() {
            1 => buf.push(v as u8),
            3 => {
                buf.push(0xfd);
                buf.extend_from_slice(&(v as u16).to_le_bytes());
            }
            5 => {
                buf.push(0xfe);
                buf.extend_from_slice(&(v as u32).to_le_bytes());
            }
            _ => {
                buf.push(0xff);
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor over a byte slice for decoding wire-format data.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let end = self.pos.checked_add(n).ok_or(PrimitivesError::UnexpectedEof)?;
        let slice = self.data.get(self.pos..end).ok_or(PrimitivesError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt in any of its four forms.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let v = match self.read_u8()? {
            0xff => self.read_u64_le()?,
            0xfe => self.read_u32_le()? as u64,
            0xfd => self.read_u16_le()? as u64,
            b => b as u64,
        };
        Ok(VarInt(v))
    }

    /// Read a VarInt length prefix followed by that many bytes.
    ///
    /// A length above `max_len` is rejected before any payload is read,
    /// so a hostile prefix cannot trigger a large allocation.
    ///
    /// # Arguments
    /// * `max_len` - Largest accepted payload length.
    ///
    /// # Returns
    /// The payload bytes; a zero length prefix yields an empty vector.
    pub fn read_var_bytes(&mut self, max_len: usize) -> Result<Vec<u8>, PrimitivesError> {
        let len = self.read_varint()?.value();
        if len > max_len as u64 {
            return Err(PrimitivesError::TooLarge { len, max: max_len });
        }
        Ok(self.read_bytes(len as usize)?.to_vec())
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Return the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// An append-only buffer for encoding wire-format data.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        WireWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt in its minimal form.
    pub fn write_varint(&mut self, varint: VarInt) {
        varint.append_to(&mut self.buf);
    }

    /// Append a VarInt length prefix followed by `bytes`.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.buf.extend_from_slice(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- VarInt ----

    #[test]
    fn test_decode_varint_all_forms() {
        assert_eq!(VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap(), (VarInt(0), 9));
        assert_eq!(VarInt::from_bytes(&[0xfe, 0, 0, 0, 0]).unwrap(), (VarInt(0), 5));
        assert_eq!(VarInt::from_bytes(&[0xfd, 0, 0]).unwrap(), (VarInt(0), 3));
        assert_eq!(VarInt::from_bytes(&[0x01, 0xaa]).unwrap(), (VarInt(1), 1));
    }

    /// Truncated encodings and empty input fail instead of reading out of bounds.
    #[test]
    fn test_decode_varint_truncated() {
        assert!(VarInt::from_bytes(&[]).is_err());
        assert!(VarInt::from_bytes(&[0xfd, 0x01]).is_err());
        assert!(VarInt::from_bytes(&[0xfe, 0x01, 0x02, 0x03]).is_err());
        assert!(VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_varint_minimal_encoding() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0xffff, vec![0xfd, 0xff, 0xff]),
            (0x10000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0xffff_ffff, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (0x1_0000_0000, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
            (u64::MAX, vec![0xff; 9]),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);
            assert_eq!(vi.length(), expected.len(), "length mismatch for {}", value);
            let (decoded, used) = VarInt::from_bytes(&expected).unwrap();
            assert_eq!(decoded, vi);
            assert_eq!(used, expected.len());
        }
    }

    /// Non-minimal encodings are still accepted on input.
    #[test]
    fn test_decode_non_minimal_varint() {
        assert_eq!(VarInt::from_bytes(&[0xfd, 0x05, 0x00]).unwrap(), (VarInt(5), 3));
    }

    // ---- WireReader / WireWriter ----

    #[test]
    fn test_reader_writer_roundtrip() {
        let mut writer = WireWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0xDEADBEEF);
        writer.write_u64_le(0x0102030405060708);
        writer.write_varint(VarInt(300));
        writer.write_var_bytes(b"hello");

        let data = writer.into_bytes();
        let mut reader = WireReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_varint().unwrap(), VarInt(300));
        assert_eq!(reader.read_var_bytes(100).unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), data.len());
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = WireReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(matches!(reader.read_u8(), Err(PrimitivesError::UnexpectedEof)));
        assert!(reader.read_bytes(usize::MAX).is_err());
    }

    #[test]
    fn test_read_var_bytes_limits() {
        let mut reader = WireReader::new(&[0x00]);
        assert!(reader.read_var_bytes(10).unwrap().is_empty());

        let mut reader = WireReader::new(&[0x05, 1, 2, 3, 4, 5]);
        assert!(matches!(
            reader.read_var_bytes(4),
            Err(PrimitivesError::TooLarge { len: 5, max: 4 })
        ));

        let mut reader = WireReader::new(&[0x05, 1, 2]);
        assert!(reader.read_var_bytes(10).is_err());
    }
}
