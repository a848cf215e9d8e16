use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::DecodeError;
use super::header::{Header, OpCode};
use super::layout::poll_reply as layout;
use super::reader::ArtNetReader;
use super::values::{MacAddress, RdmUid, U24};
use super::writer::ArtNetWriter;
use crate::protocols::common::byteorder::to_big_endian_bytes;
use crate::protocols::common::hex::byte_list;

/// Discovery response sent by a node.
///
/// `port` and `esta_manufacturer` are transmitted low byte first and are
/// stored here as their numeric values. The four per-port bitfields keep
/// their packed 32-bit form; port 1 is the most significant byte. The
/// trailing filler is kept as received so `encode` reproduces the datagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtPollReply {
    pub ip_address: Ipv4Addr,
    pub port: u16,
    pub version_info: u16,
    pub net_switch: u8,
    pub sub_switch: u8,
    pub oem: u16,
    pub ubea_version: u8,
    pub status1: u8,
    pub esta_manufacturer: u16,
    pub port_name: String,
    pub long_name: String,
    pub node_report: String,
    pub num_ports: u16,
    pub port_types: u32,
    pub good_input: u32,
    pub good_output: u32,
    pub switch_in: u32,
    pub switch_out: u32,
    pub acn_priority: u8,
    pub switch_macro: u8,
    pub switch_remote: u8,
    pub padding: U24,
    pub style: u8,
    pub mac: MacAddress,
    pub bind_ip: Ipv4Addr,
    pub bind_index: u8,
    pub status2: u8,
    pub good_output_b: u32,
    pub status3: u8,
    pub default_response_uid: RdmUid,
    pub user: u16,
    pub refresh_rate: u16,
    #[serde(skip)]
    pub filler: [u8; 11],
}

impl ArtPollReply {
    pub const HEADER: Header = Header::common(OpCode::PollReply);
    pub const WIRE_LEN: usize = layout::LEN;

    /// Decode a complete ArtPollReply datagram.
    ///
    /// # Errors
    /// Returns `DecodeError::LengthMismatch` unless the buffer is exactly
    /// 239 bytes, and a signature/opcode error for any other packet.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let reader = ArtNetReader::new(payload);
        reader.require_exact_len(layout::LEN)?;
        Self::HEADER.check(&reader)?;

        Ok(Self {
            ip_address: reader.read_ipv4(&layout::IP_ADDRESS)?,
            port: reader.read_u16(&layout::PORT)?,
            version_info: reader.read_u16(&layout::VERSION_INFO)?,
            net_switch: reader.read_u8(&layout::NET_SWITCH)?,
            sub_switch: reader.read_u8(&layout::SUB_SWITCH)?,
            oem: reader.read_u16(&layout::OEM)?,
            ubea_version: reader.read_u8(&layout::UBEA_VERSION)?,
            status1: reader.read_u8(&layout::STATUS1)?,
            esta_manufacturer: reader.read_u16(&layout::ESTA_MAN)?,
            port_name: reader.read_text(&layout::PORT_NAME)?,
            long_name: reader.read_text(&layout::LONG_NAME)?,
            node_report: reader.read_text(&layout::NODE_REPORT)?,
            num_ports: reader.read_u16(&layout::NUM_PORTS)?,
            port_types: reader.read_u32(&layout::PORT_TYPES)?,
            good_input: reader.read_u32(&layout::GOOD_INPUT)?,
            good_output: reader.read_u32(&layout::GOOD_OUTPUT)?,
            switch_in: reader.read_u32(&layout::SWITCH_IN)?,
            switch_out: reader.read_u32(&layout::SWITCH_OUT)?,
            acn_priority: reader.read_u8(&layout::ACN_PRIORITY)?,
            switch_macro: reader.read_u8(&layout::SWITCH_MACRO)?,
            switch_remote: reader.read_u8(&layout::SWITCH_REMOTE)?,
            padding: U24::from_be_bytes(reader.read_array(&layout::PADDING)?),
            style: reader.read_u8(&layout::STYLE)?,
            mac: MacAddress(reader.read_array(&layout::MAC)?),
            bind_ip: reader.read_ipv4(&layout::BIND_IP)?,
            bind_index: reader.read_u8(&layout::BIND_INDEX)?,
            status2: reader.read_u8(&layout::STATUS2)?,
            good_output_b: reader.read_u32(&layout::GOOD_OUTPUT_B)?,
            status3: reader.read_u8(&layout::STATUS3)?,
            default_response_uid: RdmUid(reader.read_array(&layout::DEFAULT_UID)?),
            user: reader.read_u16(&layout::USER)?,
            refresh_rate: reader.read_u16(&layout::REFRESH_RATE)?,
            filler: reader.read_array(&layout::FILLER)?,
        })
    }

    /// Serialize with the same layout `decode` reads. Text longer than its
    /// field is truncated.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(layout::LEN);
        Self::HEADER.write(&mut writer);
        writer.put_ipv4(&layout::IP_ADDRESS, self.ip_address);
        writer.put_u16(&layout::PORT, self.port);
        writer.put_u16(&layout::VERSION_INFO, self.version_info);
        writer.put_u8(&layout::NET_SWITCH, self.net_switch);
        writer.put_u8(&layout::SUB_SWITCH, self.sub_switch);
        writer.put_u16(&layout::OEM, self.oem);
        writer.put_u8(&layout::UBEA_VERSION, self.ubea_version);
        writer.put_u8(&layout::STATUS1, self.status1);
        writer.put_u16(&layout::ESTA_MAN, self.esta_manufacturer);
        writer.put_text(&layout::PORT_NAME, &self.port_name);
        writer.put_text(&layout::LONG_NAME, &self.long_name);
        writer.put_text(&layout::NODE_REPORT, &self.node_report);
        writer.put_u16(&layout::NUM_PORTS, self.num_ports);
        writer.put_u32(&layout::PORT_TYPES, self.port_types);
        writer.put_u32(&layout::GOOD_INPUT, self.good_input);
        writer.put_u32(&layout::GOOD_OUTPUT, self.good_output);
        writer.put_u32(&layout::SWITCH_IN, self.switch_in);
        writer.put_u32(&layout::SWITCH_OUT, self.switch_out);
        writer.put_u8(&layout::ACN_PRIORITY, self.acn_priority);
        writer.put_u8(&layout::SWITCH_MACRO, self.switch_macro);
        writer.put_u8(&layout::SWITCH_REMOTE, self.switch_remote);
        writer.put_bytes(&layout::PADDING, &self.padding.to_be_bytes());
        writer.put_u8(&layout::STYLE, self.style);
        writer.put_bytes(&layout::MAC, &self.mac.0);
        writer.put_ipv4(&layout::BIND_IP, self.bind_ip);
        writer.put_u8(&layout::BIND_INDEX, self.bind_index);
        writer.put_u8(&layout::STATUS2, self.status2);
        writer.put_u32(&layout::GOOD_OUTPUT_B, self.good_output_b);
        writer.put_u8(&layout::STATUS3, self.status3);
        writer.put_bytes(&layout::DEFAULT_UID, &self.default_response_uid.0);
        writer.put_u16(&layout::USER, self.user);
        writer.put_u16(&layout::REFRESH_RATE, self.refresh_rate);
        writer.put_bytes(&layout::FILLER, &self.filler);
        writer.finish()
    }

    pub fn port_types_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.port_types)
    }

    pub fn good_input_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.good_input)
    }

    pub fn good_output_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.good_output)
    }

    pub fn switch_in_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.switch_in)
    }

    pub fn switch_out_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.switch_out)
    }

    pub fn good_output_b_bytes(&self) -> [u8; 4] {
        to_big_endian_bytes(self.good_output_b)
    }
}

impl fmt::Display for ArtPollReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: [(&str, String); 32] = [
            ("IP addr:", self.ip_address.to_string()),
            ("Port:", self.port.to_string()),
            ("FW version:", format!("{:#06x}", self.version_info)),
            ("ArtNet Net:", self.net_switch.to_string()),
            ("ArtNet Switch:", self.sub_switch.to_string()),
            ("OEM code:", format!("{:#06x}", self.oem)),
            ("UBEA version:", self.ubea_version.to_string()),
            ("Status 1:", format!("{:#04x}", self.status1)),
            ("ESTA manufacturer:", format!("{:#06x}", self.esta_manufacturer)),
            ("Port name:", self.port_name.clone()),
            ("Long name:", self.long_name.clone()),
            ("Node report:", self.node_report.clone()),
            ("# ports:", self.num_ports.to_string()),
            ("Port types:", byte_list(&self.port_types_bytes())),
            ("Good input:", byte_list(&self.good_input_bytes())),
            ("Good output:", byte_list(&self.good_output_bytes())),
            ("Switch input:", byte_list(&self.switch_in_bytes())),
            ("Switch output:", byte_list(&self.switch_out_bytes())),
            ("sACN priority:", self.acn_priority.to_string()),
            ("Switch macro:", self.switch_macro.to_string()),
            ("Switch remote:", self.switch_remote.to_string()),
            ("Padding:", self.padding.to_string()),
            ("Style:", self.style.to_string()),
            ("MAC address:", self.mac.to_string()),
            ("Bind IP:", self.bind_ip.to_string()),
            ("Bind index:", self.bind_index.to_string()),
            ("Status 2:", format!("{:#04x}", self.status2)),
            ("Good output B:", byte_list(&self.good_output_b_bytes())),
            ("Status 3:", format!("{:#04x}", self.status3)),
            ("Response UID:", self.default_response_uid.to_string()),
            ("User bytes:", format!("{:#06x}", self.user)),
            ("Refresh rate:", self.refresh_rate.to_string()),
        ];
        writeln!(f, "ArtPollReply packet:")?;
        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{label:<20} {value}")?;
        }
        Ok(())
    }
}
