use std::net::Ipv4Addr;

use super::header::{Header, OpCode};
use super::layout::ip_prog::{
    self as layout, CMD_DHCP, CMD_GATEWAY, CMD_IP, CMD_PORT, CMD_PROGRAM, CMD_RESET, CMD_SUBNET,
};
use super::writer::ArtNetWriter;
use super::OutboundPacket;

/// Remote network reconfiguration request.
///
/// A fresh value has a zero command byte, which asks the node to report its
/// current configuration without changing anything. Each setter stores the
/// new value and raises both its enable bit and the programming bit (bit 7);
/// values are only reachable through the setters so the two never disagree.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use artprobe_core::ArtIpProg;
///
/// let mut prog = ArtIpProg::new();
/// prog.set_new_ip(Ipv4Addr::new(192, 168, 1, 50));
/// assert_eq!(prog.command(), 0b1000_0100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtIpProg {
    command: u8,
    new_ip: Ipv4Addr,
    new_subnet_mask: Ipv4Addr,
    new_port: u16,
    new_gateway: Ipv4Addr,
}

impl Default for ArtIpProg {
    fn default() -> Self {
        Self {
            command: 0,
            new_ip: Ipv4Addr::UNSPECIFIED,
            new_subnet_mask: Ipv4Addr::UNSPECIFIED,
            new_port: 0,
            new_gateway: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl ArtIpProg {
    pub const HEADER: Header = Header::standard(OpCode::IpProg);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_new_ip(&mut self, ip: Ipv4Addr) {
        self.command |= CMD_PROGRAM | CMD_IP;
        self.new_ip = ip;
    }

    pub fn set_new_subnet_mask(&mut self, mask: Ipv4Addr) {
        self.command |= CMD_PROGRAM | CMD_SUBNET;
        self.new_subnet_mask = mask;
    }

    pub fn set_new_port(&mut self, port: u16) {
        self.command |= CMD_PROGRAM | CMD_PORT;
        self.new_port = port;
    }

    pub fn set_new_gateway(&mut self, gateway: Ipv4Addr) {
        self.command |= CMD_PROGRAM | CMD_GATEWAY;
        self.new_gateway = gateway;
    }

    /// Switch the node between DHCP (`true`) and static addressing (`false`).
    pub fn set_dhcp(&mut self, enabled: bool) {
        self.command |= CMD_PROGRAM;
        if enabled {
            self.command |= CMD_DHCP;
        } else {
            self.command &= !CMD_DHCP;
        }
    }

    /// Ask the node to return its network parameters to factory defaults.
    pub fn set_reset_defaults(&mut self) {
        self.command |= CMD_PROGRAM | CMD_RESET;
    }

    pub fn command(&self) -> u8 {
        self.command
    }

    pub fn is_readback(&self) -> bool {
        self.command == 0
    }

    pub fn new_ip(&self) -> Ipv4Addr {
        self.new_ip
    }

    pub fn new_subnet_mask(&self) -> Ipv4Addr {
        self.new_subnet_mask
    }

    pub fn new_port(&self) -> u16 {
        self.new_port
    }

    pub fn new_gateway(&self) -> Ipv4Addr {
        self.new_gateway
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(layout::LEN);
        Self::HEADER.write(&mut writer);
        writer.put_u8(&layout::COMMAND, self.command);
        writer.put_ipv4(&layout::NEW_IP, self.new_ip);
        writer.put_ipv4(&layout::NEW_SUBNET, self.new_subnet_mask);
        writer.put_u16(&layout::NEW_PORT, self.new_port);
        writer.put_ipv4(&layout::NEW_GATEWAY, self.new_gateway);
        writer.finish()
    }
}

impl OutboundPacket for ArtIpProg {
    const OPCODE: OpCode = OpCode::IpProg;

    fn encode(&self) -> Vec<u8> {
        ArtIpProg::encode(self)
    }
}
