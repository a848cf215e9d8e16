//! Field descriptors for every supported Art-Net packet kind.
//!
//! Each field is declared once with its width and byte order; offsets are
//! derived from the preceding field, so encoders and decoders cannot drift
//! apart. Multi-byte fields are big-endian unless marked `LowFirst`.

use std::ops::Range;

pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";
pub const PROTOCOL_VERSION: u16 = 14;
pub const DEFAULT_PORT: u16 = 6454;

pub const OP_POLL: u16 = 0x2000;
pub const OP_POLL_REPLY: u16 = 0x2100;
pub const OP_COMMAND: u16 = 0x2400;
pub const OP_IP_PROG: u16 = 0xf800;
pub const OP_IP_PROG_REPLY: u16 = 0xf900;

/// Order in which a multi-byte field is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first (the Art-Net exceptions).
    LowFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub order: ByteOrder,
}

impl Field {
    pub const fn first(name: &'static str, width: usize) -> Self {
        Self {
            name,
            offset: 0,
            width,
            order: ByteOrder::Big,
        }
    }

    pub const fn after(prev: Field, name: &'static str, width: usize) -> Self {
        Self {
            name,
            offset: prev.end(),
            width,
            order: ByteOrder::Big,
        }
    }

    pub const fn low_first(self) -> Self {
        Self {
            order: ByteOrder::LowFirst,
            ..self
        }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const ID: Field = Field::first("id", 8);
pub const OPCODE: Field = Field::after(ID, "opcode", 2).low_first();
pub const VERSION: Field = Field::after(OPCODE, "protocol_version", 2);

pub const HEADER_LEN: usize = OPCODE.end();
pub const STANDARD_HEADER_LEN: usize = VERSION.end();

pub mod poll {
    use super::{Field, VERSION};

    pub const FLAGS: Field = Field::after(VERSION, "flags", 1);
    pub const DIAG_PRIORITY: Field = Field::after(FLAGS, "diag_priority", 1);
    pub const TARGET_TOP: Field = Field::after(DIAG_PRIORITY, "target_port_top", 2);
    pub const TARGET_BOTTOM: Field = Field::after(TARGET_TOP, "target_port_bottom", 2);
    pub const ESTA_MAN: Field = Field::after(TARGET_BOTTOM, "esta_man", 2);
    pub const OEM: Field = Field::after(ESTA_MAN, "oem", 2);

    pub const FIELDS: &[Field] = &[
        super::ID,
        super::OPCODE,
        VERSION,
        FLAGS,
        DIAG_PRIORITY,
        TARGET_TOP,
        TARGET_BOTTOM,
        ESTA_MAN,
        OEM,
    ];
    pub const LEN: usize = OEM.end();
}

pub mod ip_prog {
    use super::{Field, VERSION};

    pub const FILLER1: Field = Field::after(VERSION, "filler1", 1);
    pub const FILLER2: Field = Field::after(FILLER1, "filler2", 1);
    pub const COMMAND: Field = Field::after(FILLER2, "command", 1);
    pub const FILLER4: Field = Field::after(COMMAND, "filler4", 1);
    pub const NEW_IP: Field = Field::after(FILLER4, "new_ip", 4);
    pub const NEW_SUBNET: Field = Field::after(NEW_IP, "new_subnet_mask", 4);
    pub const NEW_PORT: Field = Field::after(NEW_SUBNET, "new_port", 2);
    pub const NEW_GATEWAY: Field = Field::after(NEW_PORT, "new_gateway", 4);

    pub const FIELDS: &[Field] = &[
        super::ID,
        super::OPCODE,
        VERSION,
        FILLER1,
        FILLER2,
        COMMAND,
        FILLER4,
        NEW_IP,
        NEW_SUBNET,
        NEW_PORT,
        NEW_GATEWAY,
    ];
    pub const LEN: usize = NEW_GATEWAY.end();

    pub const CMD_PROGRAM: u8 = 1 << 7;
    pub const CMD_DHCP: u8 = 1 << 6;
    pub const CMD_GATEWAY: u8 = 1 << 4;
    pub const CMD_RESET: u8 = 1 << 3;
    pub const CMD_IP: u8 = 1 << 2;
    pub const CMD_SUBNET: u8 = 1 << 1;
    pub const CMD_PORT: u8 = 1 << 0;
}

pub mod command {
    use super::{Field, VERSION};

    pub const ESTA_MAN: Field = Field::after(VERSION, "esta_man", 2);
    pub const LENGTH: Field = Field::after(ESTA_MAN, "length", 2);

    pub const FIELDS: &[Field] = &[super::ID, super::OPCODE, VERSION, ESTA_MAN, LENGTH];
    pub const DATA_OFFSET: usize = LENGTH.end();

    /// ESTA wildcard every ArtCommand is sent with.
    pub const ESTA_WILDCARD: u16 = 0xffff;
    /// Largest command payload, terminator included.
    pub const MAX_DATA_LEN: usize = 512;
}

pub mod poll_reply {
    use super::{Field, OPCODE};

    pub const IP_ADDRESS: Field = Field::after(OPCODE, "ip_address", 4);
    pub const PORT: Field = Field::after(IP_ADDRESS, "port", 2).low_first();
    pub const VERSION_INFO: Field = Field::after(PORT, "version_info", 2);
    pub const NET_SWITCH: Field = Field::after(VERSION_INFO, "net_switch", 1);
    pub const SUB_SWITCH: Field = Field::after(NET_SWITCH, "sub_switch", 1);
    pub const OEM: Field = Field::after(SUB_SWITCH, "oem", 2);
    pub const UBEA_VERSION: Field = Field::after(OEM, "ubea_version", 1);
    pub const STATUS1: Field = Field::after(UBEA_VERSION, "status1", 1);
    pub const ESTA_MAN: Field = Field::after(STATUS1, "esta_man", 2).low_first();
    pub const PORT_NAME: Field = Field::after(ESTA_MAN, "port_name", 18);
    pub const LONG_NAME: Field = Field::after(PORT_NAME, "long_name", 64);
    pub const NODE_REPORT: Field = Field::after(LONG_NAME, "node_report", 64);
    pub const NUM_PORTS: Field = Field::after(NODE_REPORT, "num_ports", 2);
    pub const PORT_TYPES: Field = Field::after(NUM_PORTS, "port_types", 4);
    pub const GOOD_INPUT: Field = Field::after(PORT_TYPES, "good_input", 4);
    pub const GOOD_OUTPUT: Field = Field::after(GOOD_INPUT, "good_output", 4);
    pub const SWITCH_IN: Field = Field::after(GOOD_OUTPUT, "switch_in", 4);
    pub const SWITCH_OUT: Field = Field::after(SWITCH_IN, "switch_out", 4);
    pub const ACN_PRIORITY: Field = Field::after(SWITCH_OUT, "acn_priority", 1);
    pub const SWITCH_MACRO: Field = Field::after(ACN_PRIORITY, "switch_macro", 1);
    pub const SWITCH_REMOTE: Field = Field::after(SWITCH_MACRO, "switch_remote", 1);
    pub const PADDING: Field = Field::after(SWITCH_REMOTE, "padding", 3);
    pub const STYLE: Field = Field::after(PADDING, "style", 1);
    pub const MAC: Field = Field::after(STYLE, "mac", 6);
    pub const BIND_IP: Field = Field::after(MAC, "bind_ip", 4);
    pub const BIND_INDEX: Field = Field::after(BIND_IP, "bind_index", 1);
    pub const STATUS2: Field = Field::after(BIND_INDEX, "status2", 1);
    pub const GOOD_OUTPUT_B: Field = Field::after(STATUS2, "good_output_b", 4);
    pub const STATUS3: Field = Field::after(GOOD_OUTPUT_B, "status3", 1);
    pub const DEFAULT_UID: Field = Field::after(STATUS3, "default_response_uid", 6);
    pub const USER: Field = Field::after(DEFAULT_UID, "user", 2);
    pub const REFRESH_RATE: Field = Field::after(USER, "refresh_rate", 2);
    pub const FILLER: Field = Field::after(REFRESH_RATE, "filler", 11);

    pub const FIELDS: &[Field] = &[
        super::ID,
        OPCODE,
        IP_ADDRESS,
        PORT,
        VERSION_INFO,
        NET_SWITCH,
        SUB_SWITCH,
        OEM,
        UBEA_VERSION,
        STATUS1,
        ESTA_MAN,
        PORT_NAME,
        LONG_NAME,
        NODE_REPORT,
        NUM_PORTS,
        PORT_TYPES,
        GOOD_INPUT,
        GOOD_OUTPUT,
        SWITCH_IN,
        SWITCH_OUT,
        ACN_PRIORITY,
        SWITCH_MACRO,
        SWITCH_REMOTE,
        PADDING,
        STYLE,
        MAC,
        BIND_IP,
        BIND_INDEX,
        STATUS2,
        GOOD_OUTPUT_B,
        STATUS3,
        DEFAULT_UID,
        USER,
        REFRESH_RATE,
        FILLER,
    ];
    pub const LEN: usize = FILLER.end();
}

pub mod ip_prog_reply {
    use super::{Field, VERSION};

    pub const FILLER: Field = Field::after(VERSION, "filler", 4);
    pub const IP_ADDRESS: Field = Field::after(FILLER, "ip_address", 4);
    pub const SUBNET_MASK: Field = Field::after(IP_ADDRESS, "subnet_mask", 4);
    pub const PORT: Field = Field::after(SUBNET_MASK, "port", 2);
    pub const STATUS: Field = Field::after(PORT, "status", 1);
    pub const SPARE: Field = Field::after(STATUS, "spare", 1);
    pub const GATEWAY: Field = Field::after(SPARE, "gateway", 4);
    pub const TAIL: Field = Field::after(GATEWAY, "spare_tail", 2);

    pub const FIELDS: &[Field] = &[
        super::ID,
        super::OPCODE,
        VERSION,
        FILLER,
        IP_ADDRESS,
        SUBNET_MASK,
        PORT,
        STATUS,
        SPARE,
        GATEWAY,
        TAIL,
    ];
    pub const LEN: usize = TAIL.end();

    pub const STATUS_DHCP: u8 = 1 << 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(fields: &[Field], len: usize) {
        let mut offset = 0;
        for field in fields {
            assert_eq!(field.offset, offset, "gap before {}", field.name);
            offset = field.end();
        }
        assert_eq!(offset, len);
    }

    #[test]
    fn layouts_are_contiguous() {
        assert_contiguous(poll::FIELDS, poll::LEN);
        assert_contiguous(ip_prog::FIELDS, ip_prog::LEN);
        assert_contiguous(command::FIELDS, command::DATA_OFFSET);
        assert_contiguous(poll_reply::FIELDS, poll_reply::LEN);
        assert_contiguous(ip_prog_reply::FIELDS, ip_prog_reply::LEN);
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(HEADER_LEN, 10);
        assert_eq!(STANDARD_HEADER_LEN, 12);
        assert_eq!(poll::LEN, 22);
        assert_eq!(ip_prog::LEN, 30);
        assert_eq!(command::DATA_OFFSET, 16);
        assert_eq!(poll_reply::LEN, 239);
        assert_eq!(ip_prog_reply::LEN, 34);
    }

    #[test]
    fn known_offsets() {
        assert_eq!(OPCODE.range(), 8..10);
        assert_eq!(ip_prog::COMMAND.offset, 14);
        assert_eq!(poll_reply::PORT.range(), 14..16);
        assert_eq!(poll_reply::ESTA_MAN.range(), 24..26);
        assert_eq!(poll_reply::PORT_NAME.range(), 26..44);
        assert_eq!(poll_reply::MAC.range(), 201..207);
        assert_eq!(poll_reply::DEFAULT_UID.range(), 218..224);
    }

    #[test]
    fn only_documented_exceptions_are_low_first() {
        let low_first: Vec<&str> = poll_reply::FIELDS
            .iter()
            .filter(|f| f.order == ByteOrder::LowFirst)
            .map(|f| f.name)
            .collect();
        assert_eq!(low_first, ["opcode", "port", "esta_man"]);
        assert!(
            ip_prog_reply::FIELDS
                .iter()
                .filter(|f| f.order == ByteOrder::LowFirst)
                .all(|f| f.name == "opcode")
        );
    }
}
