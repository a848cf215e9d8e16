use std::net::Ipv4Addr;

use super::error::DecodeError;
use super::layout::{self, ByteOrder, Field};
use crate::protocols::common::byteorder::{swap_bytes16, swap_bytes32};

pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), DecodeError> {
        if self.payload.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn require_min_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(DecodeError::LengthMismatch {
                expected: needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, field: &Field) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(field.range())
            .ok_or(DecodeError::LengthMismatch {
                expected: field.end(),
                actual: self.payload.len(),
            })
    }

    pub fn read_signature(&self) -> Result<&'a [u8], DecodeError> {
        self.read_slice(&layout::ID)
    }

    /// Read an unsigned field of up to four bytes, honouring its byte order.
    pub fn read_uint(&self, field: &Field) -> Result<u32, DecodeError> {
        let bytes = self.read_slice(field)?;
        debug_assert!(field.width <= 4, "{} is not an integer field", field.name);
        let value = bytes
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        Ok(match (field.order, field.width) {
            (ByteOrder::Big, _) | (_, 1) => value,
            (ByteOrder::LowFirst, 2) => u32::from(swap_bytes16(value as u16)),
            (ByteOrder::LowFirst, 4) => swap_bytes32(value),
            (ByteOrder::LowFirst, _) => bytes
                .iter()
                .rev()
                .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)),
        })
    }

    pub fn read_u8(&self, field: &Field) -> Result<u8, DecodeError> {
        debug_assert_eq!(field.width, 1, "{} is not a u8 field", field.name);
        Ok(self.read_uint(field)? as u8)
    }

    pub fn read_u16(&self, field: &Field) -> Result<u16, DecodeError> {
        debug_assert_eq!(field.width, 2, "{} is not a u16 field", field.name);
        Ok(self.read_uint(field)? as u16)
    }

    pub fn read_u32(&self, field: &Field) -> Result<u32, DecodeError> {
        debug_assert_eq!(field.width, 4, "{} is not a u32 field", field.name);
        self.read_uint(field)
    }

    pub fn read_ipv4(&self, field: &Field) -> Result<Ipv4Addr, DecodeError> {
        self.read_u32(field).map(Ipv4Addr::from)
    }

    pub fn read_array<const N: usize>(&self, field: &Field) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes[..N]);
        Ok(out)
    }

    /// Read a fixed-width text field, stopping at the first NUL.
    ///
    /// A field without any NUL is taken whole; invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn read_text(&self, field: &Field) -> Result<String, DecodeError> {
        let bytes = self.read_slice(field)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetReader;
    use crate::protocols::artnet::error::DecodeError;
    use crate::protocols::artnet::layout::Field;

    const A: Field = Field::first("a", 2);
    const B: Field = Field::after(A, "b", 2).low_first();
    const C: Field = Field::after(B, "c", 3);
    const TEXT: Field = Field::first("text", 6);

    #[test]
    fn big_and_low_first_fields() {
        let payload = [0x17, 0x70, 0x17, 0x70, 0x01, 0x02, 0x03];
        let reader = ArtNetReader::new(&payload);
        assert_eq!(reader.read_u16(&A).unwrap(), 0x1770);
        assert_eq!(reader.read_u16(&B).unwrap(), 0x7017);
        assert_eq!(reader.read_uint(&C).unwrap(), 0x0001_0203);
    }

    #[test]
    fn exact_len_reports_both_sizes() {
        let reader = ArtNetReader::new(&[0u8; 5]);
        let err = reader.require_exact_len(6).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LengthMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn short_payload_fails_field_read() {
        let reader = ArtNetReader::new(&[0u8; 3]);
        assert!(matches!(
            reader.read_u16(&B),
            Err(DecodeError::LengthMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn text_stops_at_first_nul() {
        let reader = ArtNetReader::new(b"ab\0cd\0");
        assert_eq!(reader.read_text(&TEXT).unwrap(), "ab");
    }

    #[test]
    fn text_without_nul_uses_whole_field() {
        let reader = ArtNetReader::new(b"abcdef");
        assert_eq!(reader.read_text(&TEXT).unwrap(), "abcdef");
    }
}
