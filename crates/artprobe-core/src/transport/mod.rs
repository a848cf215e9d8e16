//! Datagram transport used to exchange packets with nodes.
//!
//! The codec never touches sockets; callers hand encoded bytes to a
//! `Transport` and feed received payloads back to a decoder. Each datagram is
//! decoded on its own, so a foreign or malformed reply is skipped without
//! affecting the others.

mod udp;

pub use udp::UdpTransport;

use std::net::{SocketAddr, SocketAddrV4};
use std::time::{Duration, Instant};

use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

use crate::protocols::artnet::{DecodeError, OutboundPacket};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One received UDP payload.
#[derive(Debug, Clone)]
pub struct Datagram {
    pub source: SocketAddr,
    pub received_at: OffsetDateTime,
    pub payload: Vec<u8>,
}

/// A decoded reply with its reception metadata.
#[derive(Debug, Clone)]
pub struct Received<P> {
    pub source: SocketAddr,
    pub received_at: OffsetDateTime,
    pub packet: P,
}

pub trait Transport {
    fn send_datagram(
        &mut self,
        payload: &[u8],
        destination: SocketAddrV4,
    ) -> Result<(), TransportError>;

    /// Wait up to `timeout` for one datagram; `Ok(None)` on timeout.
    fn receive_datagram(&mut self, timeout: Duration)
    -> Result<Option<Datagram>, TransportError>;
}

/// Encode and send a packet, returning the number of bytes sent.
pub fn send_packet<T, P>(
    transport: &mut T,
    packet: &P,
    destination: SocketAddrV4,
) -> Result<usize, TransportError>
where
    T: Transport + ?Sized,
    P: OutboundPacket,
{
    let bytes = packet.encode();
    transport.send_datagram(&bytes, destination)?;
    debug!(opcode = ?P::OPCODE, len = bytes.len(), %destination, "sent packet");
    Ok(bytes.len())
}

/// Send a packet and wait for the first datagram that decodes.
///
/// Datagrams that fail to decode (including our own broadcast echoed back)
/// are skipped until `timeout` runs out.
pub fn request<T, P, R, F>(
    transport: &mut T,
    packet: &P,
    destination: SocketAddrV4,
    timeout: Duration,
    decode: F,
) -> Result<Option<Received<R>>, TransportError>
where
    T: Transport + ?Sized,
    P: OutboundPacket,
    F: FnMut(&[u8]) -> Result<R, DecodeError>,
{
    send_packet(transport, packet, destination)?;
    let mut replies = receive_decoded(transport, timeout, Some(1), decode)?;
    Ok(replies.pop())
}

/// Gather every decodable reply arriving within `window`.
pub fn collect_replies<T, R, F>(
    transport: &mut T,
    window: Duration,
    decode: F,
) -> Result<Vec<Received<R>>, TransportError>
where
    T: Transport + ?Sized,
    F: FnMut(&[u8]) -> Result<R, DecodeError>,
{
    receive_decoded(transport, window, None, decode)
}

fn receive_decoded<T, R, F>(
    transport: &mut T,
    window: Duration,
    limit: Option<usize>,
    mut decode: F,
) -> Result<Vec<Received<R>>, TransportError>
where
    T: Transport + ?Sized,
    F: FnMut(&[u8]) -> Result<R, DecodeError>,
{
    let deadline = Instant::now() + window;
    let mut replies = Vec::new();
    loop {
        if limit.is_some_and(|limit| replies.len() >= limit) {
            break;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        let Some(datagram) = transport.receive_datagram(remaining)? else {
            break;
        };
        match decode(&datagram.payload) {
            Ok(packet) => {
                debug!(source = %datagram.source, len = datagram.payload.len(), "decoded reply");
                replies.push(Received {
                    source: datagram.source,
                    received_at: datagram.received_at,
                    packet,
                });
            }
            Err(err) => {
                debug!(source = %datagram.source, error = %err, "ignoring datagram");
            }
        }
    }
    Ok(replies)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
    use std::time::Duration;

    use time::OffsetDateTime;

    use super::{Datagram, Transport, TransportError, collect_replies, request, send_packet};
    use crate::protocols::artnet::{ArtIpProg, ArtIpProgReply, ArtPoll, DecodeError};

    #[derive(Default)]
    struct ScriptedTransport {
        sent: Vec<(Vec<u8>, SocketAddrV4)>,
        inbox: VecDeque<Vec<u8>>,
    }

    impl Transport for ScriptedTransport {
        fn send_datagram(
            &mut self,
            payload: &[u8],
            destination: SocketAddrV4,
        ) -> Result<(), TransportError> {
            self.sent.push((payload.to_vec(), destination));
            Ok(())
        }

        fn receive_datagram(
            &mut self,
            _timeout: Duration,
        ) -> Result<Option<Datagram>, TransportError> {
            Ok(self.inbox.pop_front().map(|payload| Datagram {
                source: SocketAddr::from(([2, 0, 0, 9], 6454)),
                received_at: OffsetDateTime::UNIX_EPOCH,
                payload,
            }))
        }
    }

    fn dest() -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(2, 255, 255, 255), 6454)
    }

    fn reply(last_octet: u8) -> ArtIpProgReply {
        ArtIpProgReply {
            ip_address: Ipv4Addr::new(2, 0, 0, last_octet),
            subnet_mask: Ipv4Addr::new(255, 0, 0, 0),
            port: 6454,
            status: 0,
            gateway: Ipv4Addr::UNSPECIFIED,
            ..ArtIpProgReply::default()
        }
    }

    #[test]
    fn send_packet_encodes_once() {
        let mut transport = ScriptedTransport::default();
        let len = send_packet(&mut transport, &ArtPoll::new(), dest()).unwrap();
        assert_eq!(len, 22);
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(transport.sent[0].0, ArtPoll::new().encode());
        assert_eq!(transport.sent[0].1, dest());
    }

    #[test]
    fn request_skips_echo_and_garbage() {
        let mut transport = ScriptedTransport::default();
        transport.inbox.push_back(ArtIpProg::new().encode());
        transport.inbox.push_back(vec![1, 2, 3]);
        transport.inbox.push_back(reply(7).encode());
        transport.inbox.push_back(reply(8).encode());

        let received = request(
            &mut transport,
            &ArtIpProg::new(),
            dest(),
            Duration::from_secs(1),
            ArtIpProgReply::decode,
        )
        .unwrap()
        .expect("reply");
        assert_eq!(received.packet, reply(7));
        assert_eq!(transport.inbox.len(), 1);
    }

    #[test]
    fn request_times_out_without_reply() {
        let mut transport = ScriptedTransport::default();
        let received = request(
            &mut transport,
            &ArtPoll::new(),
            dest(),
            Duration::from_millis(10),
            ArtIpProgReply::decode,
        )
        .unwrap();
        assert!(received.is_none());
    }

    #[test]
    fn collect_keeps_each_good_reply() {
        let mut transport = ScriptedTransport::default();
        transport.inbox.push_back(reply(1).encode());
        transport.inbox.push_back(reply(2).encode()[..20].to_vec());
        transport.inbox.push_back(reply(3).encode());

        let mut failures = Vec::new();
        let replies = collect_replies(&mut transport, Duration::from_secs(1), |bytes| {
            ArtIpProgReply::decode(bytes).inspect_err(|err| failures.push(err.clone()))
        })
        .unwrap();
        let ips: Vec<_> = replies.iter().map(|r| r.packet.ip_address).collect();
        assert_eq!(ips, [Ipv4Addr::new(2, 0, 0, 1), Ipv4Addr::new(2, 0, 0, 3)]);
        assert_eq!(
            failures,
            [DecodeError::LengthMismatch {
                expected: 34,
                actual: 20
            }]
        );
    }
}
