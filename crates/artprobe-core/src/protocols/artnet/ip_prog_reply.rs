use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::DecodeError;
use super::header::{Header, OpCode};
use super::layout::{PROTOCOL_VERSION, VERSION, ip_prog_reply as layout};
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// Node's answer to an ArtIpProg: its (possibly updated) network settings.
///
/// The protocol version and reserved bytes are kept as received so that
/// `encode` reproduces the original datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtIpProgReply {
    pub protocol_version: u16,
    pub ip_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub port: u16,
    pub status: u8,
    pub gateway: Ipv4Addr,
    #[serde(skip)]
    pub filler: [u8; 4],
    #[serde(skip)]
    pub spare: u8,
    #[serde(skip)]
    pub spare_tail: [u8; 2],
}

impl Default for ArtIpProgReply {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            ip_address: Ipv4Addr::UNSPECIFIED,
            subnet_mask: Ipv4Addr::UNSPECIFIED,
            port: 0,
            status: 0,
            gateway: Ipv4Addr::UNSPECIFIED,
            filler: [0; 4],
            spare: 0,
            spare_tail: [0; 2],
        }
    }
}

impl ArtIpProgReply {
    pub const HEADER: Header = Header::standard(OpCode::IpProgReply);
    pub const WIRE_LEN: usize = layout::LEN;

    /// Decode a complete ArtIpProgReply datagram.
    ///
    /// # Errors
    /// Returns `DecodeError::LengthMismatch` unless the buffer is exactly
    /// 34 bytes, and a signature/opcode error for any other packet.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let reader = ArtNetReader::new(payload);
        reader.require_exact_len(layout::LEN)?;
        Self::HEADER.check(&reader)?;

        Ok(Self {
            protocol_version: reader.read_u16(&VERSION)?,
            ip_address: reader.read_ipv4(&layout::IP_ADDRESS)?,
            subnet_mask: reader.read_ipv4(&layout::SUBNET_MASK)?,
            port: reader.read_u16(&layout::PORT)?,
            status: reader.read_u8(&layout::STATUS)?,
            gateway: reader.read_ipv4(&layout::GATEWAY)?,
            filler: reader.read_array(&layout::FILLER)?,
            spare: reader.read_u8(&layout::SPARE)?,
            spare_tail: reader.read_array(&layout::TAIL)?,
        })
    }

    /// Serialize with the same layout `decode` reads, including the stored
    /// protocol version and reserved bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(layout::LEN);
        Header {
            protocol_version: Some(self.protocol_version),
            ..Self::HEADER
        }
        .write(&mut writer);
        writer.put_bytes(&layout::FILLER, &self.filler);
        writer.put_ipv4(&layout::IP_ADDRESS, self.ip_address);
        writer.put_ipv4(&layout::SUBNET_MASK, self.subnet_mask);
        writer.put_u16(&layout::PORT, self.port);
        writer.put_u8(&layout::STATUS, self.status);
        writer.put_u8(&layout::SPARE, self.spare);
        writer.put_ipv4(&layout::GATEWAY, self.gateway);
        writer.put_bytes(&layout::TAIL, &self.spare_tail);
        writer.finish()
    }

    pub fn dhcp_enabled(&self) -> bool {
        self.status & layout::STATUS_DHCP != 0
    }
}

impl fmt::Display for ArtIpProgReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ArtIpProgReply packet:")?;
        writeln!(f, "{:<15} {}", "DHCP enabled", self.dhcp_enabled())?;
        writeln!(f, "{:<15} {}", "IP addr", self.ip_address)?;
        writeln!(f, "{:<15} {}", "Subnet mask", self.subnet_mask)?;
        writeln!(f, "{:<15} {}", "Port", self.port)?;
        writeln!(f, "{:<15} {}", "Gateway", self.gateway)?;
        write!(f, "{:<15} {:#04x}", "Status", self.status)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::ArtIpProgReply;
    use crate::protocols::artnet::error::DecodeError;

    fn fixture() -> Vec<u8> {
        let mut buf = Vec::with_capacity(34);
        buf.extend_from_slice(b"Art-Net\0");
        buf.extend_from_slice(&[0x00, 0xf9, 0x00, 0x0e]);
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&[192, 168, 1, 50]);
        buf.extend_from_slice(&[255, 255, 255, 0]);
        buf.extend_from_slice(&[0x19, 0x36]);
        buf.extend_from_slice(&[0x40, 0x00]);
        buf.extend_from_slice(&[192, 168, 1, 1]);
        buf.extend_from_slice(&[0, 0]);
        buf
    }

    #[test]
    fn decodes_fields() {
        let reply = ArtIpProgReply::decode(&fixture()).unwrap();
        assert_eq!(reply.ip_address, Ipv4Addr::new(192, 168, 1, 50));
        assert_eq!(reply.subnet_mask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(reply.port, 6454);
        assert_eq!(reply.gateway, Ipv4Addr::new(192, 168, 1, 1));
        assert!(reply.dhcp_enabled());
    }

    #[test]
    fn dhcp_flag_ignores_other_bits() {
        let mut buf = fixture();
        buf[26] = 0x80;
        let reply = ArtIpProgReply::decode(&buf).unwrap();
        assert!(!reply.dhcp_enabled());
    }

    #[test]
    fn rejects_wrong_length() {
        let buf = fixture();
        assert_eq!(
            ArtIpProgReply::decode(&buf[..33]),
            Err(DecodeError::LengthMismatch {
                expected: 34,
                actual: 33
            })
        );
    }

    #[test]
    fn encode_matches_decoded_fixture() {
        let buf = fixture();
        assert_eq!(ArtIpProgReply::decode(&buf).unwrap().encode(), buf);
    }

    #[test]
    fn reserved_bytes_and_version_survive_round_trip() {
        let mut buf = fixture();
        buf[10..12].copy_from_slice(&[0x00, 0x0d]);
        buf[12..16].copy_from_slice(&[1, 2, 3, 4]);
        buf[27] = 0x5a;
        buf[32..34].copy_from_slice(&[0xa5, 0x01]);

        let reply = ArtIpProgReply::decode(&buf).unwrap();
        assert_eq!(reply.protocol_version, 13);
        assert_eq!(reply.filler, [1, 2, 3, 4]);
        assert_eq!(reply.spare, 0x5a);
        assert_eq!(reply.spare_tail, [0xa5, 0x01]);
        assert_eq!(reply.encode(), buf);
    }

    #[test]
    fn default_encodes_version_14_and_zero_reserved() {
        let bytes = ArtIpProgReply::default().encode();
        assert_eq!(&bytes[10..12], &[0x00, 0x0e]);
        assert!(bytes[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reserved_bytes_stay_out_of_json() {
        let value = serde_json::to_value(ArtIpProgReply::decode(&fixture()).unwrap()).unwrap();
        assert_eq!(value["protocol_version"], 14);
        assert!(value.get("filler").is_none());
        assert!(value.get("spare").is_none());
        assert!(value.get("spare_tail").is_none());
    }

    #[test]
    fn display_lists_settings() {
        let text = ArtIpProgReply::decode(&fixture()).unwrap().to_string();
        assert_eq!(
            text,
            "ArtIpProgReply packet:\n\
             DHCP enabled    true\n\
             IP addr         192.168.1.50\n\
             Subnet mask     255.255.255.0\n\
             Port            6454\n\
             Gateway         192.168.1.1\n\
             Status          0x40"
        );
    }
}
