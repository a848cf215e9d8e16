use std::fmt;

use serde::{Serialize, Serializer};

use super::error::FieldRangeError;
use crate::protocols::common::hex::colon_hex;

/// Six-byte hardware address, displayed as `00:1a:2b:3c:4d:5e`.
///
/// # Examples
/// ```
/// use artprobe_core::MacAddress;
///
/// let mac = MacAddress([0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
/// assert_eq!(mac.to_string(), "00:1a:2b:3c:4d:5e");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

/// RDM unique identifier (manufacturer id + device id), displayed like a MAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RdmUid(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&colon_hex(&self.0))
    }
}

impl fmt::Display for RdmUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&colon_hex(&self.0))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for RdmUid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Unsigned 24-bit quantity (the three ArtPollReply padding bytes).
///
/// # Examples
/// ```
/// use artprobe_core::U24;
///
/// assert_eq!(U24::new(0x01_0203).unwrap().get(), 0x01_0203);
/// assert!(U24::new(0x0100_0000).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct U24(u32);

impl U24 {
    pub const MAX: u32 = 0x00ff_ffff;

    pub fn new(value: u32) -> Result<Self, FieldRangeError> {
        if value > Self::MAX {
            return Err(FieldRangeError {
                field: "u24",
                value: u64::from(value),
                max: u64::from(Self::MAX),
            });
        }
        Ok(Self(value))
    }

    pub const fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Self(((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32)
    }

    pub const fn to_be_bytes(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for U24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}
