use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// Packet kinds understood by this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpCode {
    Poll,
    PollReply,
    Command,
    IpProg,
    IpProgReply,
}

impl OpCode {
    /// Protocol-assigned opcode value, before the wire byte swap.
    pub const fn value(self) -> u16 {
        match self {
            OpCode::Poll => layout::OP_POLL,
            OpCode::PollReply => layout::OP_POLL_REPLY,
            OpCode::Command => layout::OP_COMMAND,
            OpCode::IpProg => layout::OP_IP_PROG,
            OpCode::IpProgReply => layout::OP_IP_PROG_REPLY,
        }
    }

    pub const fn from_value(value: u16) -> Option<Self> {
        match value {
            layout::OP_POLL => Some(OpCode::Poll),
            layout::OP_POLL_REPLY => Some(OpCode::PollReply),
            layout::OP_COMMAND => Some(OpCode::Command),
            layout::OP_IP_PROG => Some(OpCode::IpProg),
            layout::OP_IP_PROG_REPLY => Some(OpCode::IpProgReply),
            _ => None,
        }
    }
}

/// Packet prefix: signature, opcode and (for standard packets) protocol version.
///
/// # Examples
/// ```
/// use artprobe_core::{Header, OpCode};
///
/// let header = Header::standard(OpCode::Poll);
/// assert_eq!(header.len(), 12);
/// assert_eq!(Header::common(OpCode::PollReply).len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub opcode: OpCode,
    pub protocol_version: Option<u16>,
}

impl Header {
    pub const fn common(opcode: OpCode) -> Self {
        Self {
            opcode,
            protocol_version: None,
        }
    }

    pub const fn standard(opcode: OpCode) -> Self {
        Self {
            opcode,
            protocol_version: Some(layout::PROTOCOL_VERSION),
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        match self.protocol_version {
            Some(_) => layout::STANDARD_HEADER_LEN,
            None => layout::HEADER_LEN,
        }
    }

    pub(crate) fn write(&self, writer: &mut ArtNetWriter) {
        writer.put_bytes(&layout::ID, layout::ARTNET_ID);
        writer.put_u16(&layout::OPCODE, self.opcode.value());
        if let Some(version) = self.protocol_version {
            writer.put_u16(&layout::VERSION, version);
        }
    }

    /// Validate signature and opcode. The protocol version is not checked:
    /// nodes in the field report versions other than 14.
    pub(crate) fn check(&self, reader: &ArtNetReader<'_>) -> Result<(), DecodeError> {
        if reader.read_signature()? != layout::ARTNET_ID {
            return Err(DecodeError::BadSignature);
        }
        let opcode = reader.read_u16(&layout::OPCODE)?;
        if opcode != self.opcode.value() {
            return Err(DecodeError::UnexpectedOpcode {
                expected: self.opcode.value(),
                actual: opcode,
            });
        }
        Ok(())
    }
}

/// Identify the packet kind of a datagram without decoding its body.
///
/// # Examples
/// ```
/// use artprobe_core::{ArtPoll, OpCode, peek_opcode};
///
/// let bytes = ArtPoll::new().encode();
/// assert_eq!(peek_opcode(&bytes).unwrap(), OpCode::Poll);
/// ```
///
/// # Errors
/// Returns `DecodeError` when the datagram is shorter than a header, lacks the
/// Art-Net signature, or carries an opcode outside the supported set.
pub fn peek_opcode(payload: &[u8]) -> Result<OpCode, DecodeError> {
    let reader = ArtNetReader::new(payload);
    reader.require_min_len(layout::HEADER_LEN)?;
    if reader.read_signature()? != layout::ARTNET_ID {
        return Err(DecodeError::BadSignature);
    }
    let opcode = reader.read_u16(&layout::OPCODE)?;
    OpCode::from_value(opcode).ok_or(DecodeError::UnsupportedOpcode { opcode })
}
