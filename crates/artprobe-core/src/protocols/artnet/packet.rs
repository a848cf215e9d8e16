use std::fmt;

use serde::Serialize;

use super::error::DecodeError;
use super::header::{OpCode, peek_opcode};
use super::ip_prog_reply::ArtIpProgReply;
use super::poll_reply::ArtPollReply;

/// Any inbound packet this codec decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtPacket {
    PollReply(ArtPollReply),
    IpProgReply(ArtIpProgReply),
}

impl ArtPacket {
    /// Decode a datagram by dispatching on its opcode.
    ///
    /// # Errors
    /// Returns `DecodeError::UnsupportedOpcode` for outbound-only kinds and
    /// unknown opcodes, and the kind's own errors otherwise.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        match peek_opcode(payload)? {
            OpCode::PollReply => ArtPollReply::decode(payload).map(ArtPacket::PollReply),
            OpCode::IpProgReply => ArtIpProgReply::decode(payload).map(ArtPacket::IpProgReply),
            other => Err(DecodeError::UnsupportedOpcode {
                opcode: other.value(),
            }),
        }
    }

    pub fn opcode(&self) -> OpCode {
        match self {
            ArtPacket::PollReply(_) => OpCode::PollReply,
            ArtPacket::IpProgReply(_) => OpCode::IpProgReply,
        }
    }
}

impl fmt::Display for ArtPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtPacket::PollReply(reply) => fmt::Display::fmt(reply, f),
            ArtPacket::IpProgReply(reply) => fmt::Display::fmt(reply, f),
        }
    }
}
