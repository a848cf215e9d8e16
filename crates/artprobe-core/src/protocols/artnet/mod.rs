//! Art-Net packet encoding and decoding.
//!
//! Covers discovery (ArtPoll / ArtPollReply), network programming
//! (ArtIpProg / ArtIpProgReply) and free-text commands (ArtCommand).
//! Packets are big-endian except for the opcode, and for the port and ESTA
//! code of ArtPollReply, which travel low byte first. Those exceptions are
//! declared once in `layout`; `reader` and `writer` apply them, so encode and
//! decode always agree.
//!
//! Decoders require the exact wire length before touching any field and
//! never return a partially filled packet.

pub mod command;
pub mod error;
pub mod header;
pub mod ip_prog;
pub mod ip_prog_reply;
pub mod layout;
pub mod packet;
pub mod poll;
pub mod poll_reply;
pub mod reader;
pub mod values;
pub mod writer;

pub use command::ArtCommand;
pub use error::{DecodeError, FieldRangeError};
pub use header::{Header, OpCode, peek_opcode};
pub use ip_prog::ArtIpProg;
pub use ip_prog_reply::ArtIpProgReply;
pub use packet::ArtPacket;
pub use poll::ArtPoll;
pub use poll_reply::ArtPollReply;
pub use values::{MacAddress, RdmUid, U24};

/// A packet kind this tool transmits.
pub trait OutboundPacket {
    const OPCODE: OpCode;

    fn encode(&self) -> Vec<u8>;
}
