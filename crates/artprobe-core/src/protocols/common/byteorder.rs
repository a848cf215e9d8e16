//! Byte-order helpers for fields that break the big-endian convention.

/// Reverse the two bytes of a 16-bit value.
///
/// # Examples
/// ```
/// use artprobe_core::swap_bytes16;
///
/// assert_eq!(swap_bytes16(0x2000), 0x0020);
/// ```
pub const fn swap_bytes16(value: u16) -> u16 {
    (value << 8) | (value >> 8)
}

/// Reverse the four bytes of a 32-bit value.
///
/// # Examples
/// ```
/// use artprobe_core::swap_bytes32;
///
/// assert_eq!(swap_bytes32(0x0102_0304), 0x0403_0201);
/// ```
pub const fn swap_bytes32(value: u32) -> u32 {
    ((value & 0x0000_00ff) << 24)
        | ((value & 0x0000_ff00) << 8)
        | ((value & 0x00ff_0000) >> 8)
        | ((value & 0xff00_0000) >> 24)
}

/// Split a 32-bit value into its bytes, most significant first.
///
/// Used for display of packed per-port bitfields; wire encoding goes through
/// the layout-driven reader and writer instead.
///
/// # Examples
/// ```
/// use artprobe_core::to_big_endian_bytes;
///
/// assert_eq!(to_big_endian_bytes(0xc0a8_0132), [0xc0, 0xa8, 0x01, 0x32]);
/// ```
pub const fn to_big_endian_bytes(value: u32) -> [u8; 4] {
    [
        (value >> 24) as u8,
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ]
}
