use std::net::Ipv4Addr;

use super::layout::{ByteOrder, Field};
use crate::protocols::common::byteorder::{swap_bytes16, swap_bytes32};

/// Zero-initialised output buffer addressed through layout fields.
///
/// Fields never written (fillers, spares) stay zero.
pub struct ArtNetWriter {
    buf: Vec<u8>,
}

impl ArtNetWriter {
    pub fn new(len: usize) -> Self {
        Self { buf: vec![0; len] }
    }

    /// Write an unsigned value of up to four bytes, honouring the field's byte order.
    ///
    /// Only the typed `put_u8` / `put_u16` / `put_u32` call this, each with a
    /// field as wide as its type, so `value` always fits.
    fn put_uint(&mut self, field: &Field, value: u32) {
        debug_assert!(field.width <= 4, "{} is not an integer field", field.name);
        debug_assert!(
            field.width == 4 || value >> (field.width * 8) == 0,
            "{} does not fit {}",
            value,
            field.name
        );
        let value = match (field.order, field.width) {
            (ByteOrder::Big, _) | (_, 1) => value,
            (ByteOrder::LowFirst, 2) => u32::from(swap_bytes16(value as u16)),
            (ByteOrder::LowFirst, 4) => swap_bytes32(value),
            (ByteOrder::LowFirst, width) => {
                let mut reversed = 0u32;
                for i in 0..width {
                    reversed = (reversed << 8) | ((value >> (i * 8)) & 0xff);
                }
                reversed
            }
        };
        let be = value.to_be_bytes();
        self.buf[field.range()].copy_from_slice(&be[4 - field.width..]);
    }

    pub fn put_u8(&mut self, field: &Field, value: u8) {
        debug_assert_eq!(field.width, 1, "{} is not a u8 field", field.name);
        self.put_uint(field, u32::from(value));
    }

    pub fn put_u16(&mut self, field: &Field, value: u16) {
        debug_assert_eq!(field.width, 2, "{} is not a u16 field", field.name);
        self.put_uint(field, u32::from(value));
    }

    pub fn put_u32(&mut self, field: &Field, value: u32) {
        debug_assert_eq!(field.width, 4, "{} is not a u32 field", field.name);
        self.put_uint(field, value);
    }

    pub fn put_ipv4(&mut self, field: &Field, value: Ipv4Addr) {
        self.put_u32(field, u32::from(value));
    }

    /// Copy raw bytes into a field; shorter input leaves the tail zeroed.
    pub fn put_bytes(&mut self, field: &Field, bytes: &[u8]) {
        let len = bytes.len().min(field.width);
        self.buf[field.offset..field.offset + len].copy_from_slice(&bytes[..len]);
    }

    /// Write text into a fixed-width field, truncated to the field width.
    pub fn put_text(&mut self, field: &Field, text: &str) {
        self.put_bytes(field, text.as_bytes());
    }

    /// Append bytes past the fixed layout (variable-length payloads).
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
