use std::io::ErrorKind;
use std::net::{SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use time::OffsetDateTime;
use tracing::debug;

use super::{Datagram, Transport, TransportError};
use crate::config::TransportConfig;

const RECV_BUFFER_LEN: usize = 2048;
// set_read_timeout rejects a zero duration
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Blocking UDP socket bound per `TransportConfig`.
pub struct UdpTransport {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpTransport {
    pub fn open(config: &TransportConfig) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(config.bind)?;
        socket.set_broadcast(config.broadcast)?;
        debug!(bind = %config.bind, broadcast = config.broadcast, "udp transport open");
        Ok(Self {
            socket,
            buf: vec![0; RECV_BUFFER_LEN],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

impl Transport for UdpTransport {
    fn send_datagram(
        &mut self,
        payload: &[u8],
        destination: SocketAddrV4,
    ) -> Result<(), TransportError> {
        self.socket.send_to(payload, destination)?;
        Ok(())
    }

    fn receive_datagram(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Datagram>, TransportError> {
        self.socket.set_read_timeout(Some(timeout.max(MIN_TIMEOUT)))?;
        match self.socket.recv_from(&mut self.buf) {
            Ok((len, source)) => Ok(Some(Datagram {
                source,
                received_at: OffsetDateTime::now_utc(),
                payload: self.buf[..len].to_vec(),
            })),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
