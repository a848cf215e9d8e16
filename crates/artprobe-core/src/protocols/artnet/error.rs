use thiserror::Error;

/// Errors returned when a received datagram cannot be decoded.
///
/// # Examples
/// ```
/// use artprobe_core::DecodeError;
///
/// let err = DecodeError::LengthMismatch { expected: 239, actual: 238 };
/// assert!(err.to_string().contains("expected 239 bytes, got 238"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("missing Art-Net signature")]
    BadSignature,
    #[error("unexpected opcode: expected {expected:#06x}, got {actual:#06x}")]
    UnexpectedOpcode { expected: u16, actual: u16 },
    #[error("unsupported opcode: {opcode:#06x}")]
    UnsupportedOpcode { opcode: u16 },
}

/// A value does not fit the wire field it is destined for.
///
/// # Examples
/// ```
/// use artprobe_core::FieldRangeError;
///
/// let err = FieldRangeError { field: "padding", value: 0x0100_0000, max: 0x00ff_ffff };
/// assert!(err.to_string().contains("padding"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {value} out of range for field `{field}` (max {max})")]
pub struct FieldRangeError {
    pub field: &'static str,
    pub value: u64,
    pub max: u64,
}
