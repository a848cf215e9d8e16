//! ArtProbe core library: Art-Net discovery and IP-programming codec.
//!
//! This crate encodes the packets a controller sends (ArtPoll, ArtIpProg,
//! ArtCommand) and decodes the replies nodes send back (ArtPollReply,
//! ArtIpProgReply). Wire layouts are declared once as field descriptors and
//! shared by encoders and decoders, including the few fields Art-Net sends
//! low byte first. Codecs are byte-oriented and side-effect free; socket I/O
//! is isolated in `transport`.
//!
//! Invariants:
//! - Every packet starts with `"Art-Net\0"` and an opcode sent low byte first.
//! - Decoders accept only the exact wire length and never yield partial values.
//! - Setting an ArtIpProg value always raises its enable bit and bit 7.
//!
//! # Examples
//! ```
//! use std::net::Ipv4Addr;
//!
//! use artprobe_core::{ArtIpProg, ArtIpProgReply};
//!
//! let mut prog = ArtIpProg::new();
//! prog.set_new_ip(Ipv4Addr::new(2, 0, 0, 50));
//! let request = prog.encode();
//! assert_eq!(request[14], 0x84);
//!
//! let reply = ArtIpProgReply {
//!     ip_address: Ipv4Addr::new(2, 0, 0, 50),
//!     subnet_mask: Ipv4Addr::new(255, 0, 0, 0),
//!     port: 6454,
//!     status: 0,
//!     gateway: Ipv4Addr::UNSPECIFIED,
//!     ..ArtIpProgReply::default()
//! };
//! let decoded = ArtIpProgReply::decode(&reply.encode())?;
//! assert_eq!(decoded.ip_address, Ipv4Addr::new(2, 0, 0, 50));
//! # Ok::<(), artprobe_core::DecodeError>(())
//! ```

use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

mod config;
mod protocols;
mod transport;

pub use config::{ConfigError, TransportConfig};
pub use protocols::artnet::{
    ArtCommand, ArtIpProg, ArtIpProgReply, ArtPacket, ArtPoll, ArtPollReply, DecodeError,
    FieldRangeError, Header, MacAddress, OpCode, OutboundPacket, RdmUid, U24, peek_opcode,
};
pub use protocols::artnet::layout::{self, DEFAULT_PORT, PROTOCOL_VERSION};
pub use protocols::common::byteorder::{swap_bytes16, swap_bytes32, to_big_endian_bytes};
pub use transport::{
    Datagram, Received, Transport, TransportError, UdpTransport, collect_replies, request,
    send_packet,
};

/// Timestamp used when a reception time cannot be formatted.
pub const DEFAULT_RECEIVED_AT: &str = "1970-01-01T00:00:00Z";

/// Serializable view of a received reply.
///
/// # Examples
/// ```
/// use artprobe_core::ReplyRecord;
///
/// let record = ReplyRecord {
///     received_at: "2024-01-01T00:00:00Z".to_string(),
///     source: Some("2.0.0.10:6454".to_string()),
///     packet: 42u8,
/// };
/// assert_eq!(record.packet, 42);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRecord<P> {
    /// RFC3339 reception timestamp.
    pub received_at: String,
    /// Sender endpoint in `ip:port` form, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Decoded packet.
    pub packet: P,
}

impl<P> From<Received<P>> for ReplyRecord<P> {
    fn from(value: Received<P>) -> Self {
        Self {
            received_at: format_timestamp(value.received_at),
            source: Some(value.source.to_string()),
            packet: value.packet,
        }
    }
}

/// Format a timestamp as RFC3339, falling back to the epoch.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_RECEIVED_AT.to_string())
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddr};

    use time::OffsetDateTime;

    use super::*;

    #[test]
    fn record_from_received_formats_metadata() {
        let received = Received {
            source: SocketAddr::from(([2, 0, 0, 10], 6454)),
            received_at: OffsetDateTime::UNIX_EPOCH,
            packet: ArtIpProgReply {
                ip_address: Ipv4Addr::new(2, 0, 0, 10),
                subnet_mask: Ipv4Addr::new(255, 0, 0, 0),
                port: 6454,
                status: 0x40,
                gateway: Ipv4Addr::UNSPECIFIED,
                ..ArtIpProgReply::default()
            },
        };
        let record = ReplyRecord::from(received);
        assert_eq!(record.received_at, DEFAULT_RECEIVED_AT);
        assert_eq!(record.source.as_deref(), Some("2.0.0.10:6454"));

        let value = serde_json::to_value(&record).expect("record json");
        assert_eq!(value["packet"]["subnet_mask"], "255.0.0.0");
        assert_eq!(value["packet"]["status"], 64);
    }

    #[test]
    fn record_omits_missing_source() {
        let record = ReplyRecord {
            received_at: DEFAULT_RECEIVED_AT.to_string(),
            source: None,
            packet: 1u8,
        };
        let value = serde_json::to_value(&record).expect("record json");
        assert!(value.get("source").is_none());
    }
}
