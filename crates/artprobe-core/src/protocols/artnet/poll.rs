use super::header::{Header, OpCode};
use super::layout::poll as layout;
use super::writer::ArtNetWriter;
use super::OutboundPacket;

/// Discovery request. The default value is an unfiltered poll with
/// diagnostics disabled.
///
/// # Examples
/// ```
/// use artprobe_core::ArtPoll;
///
/// let bytes = ArtPoll::new().with_esta_filter(0x7ff0).encode();
/// assert_eq!(bytes.len(), 22);
/// assert_eq!(&bytes[18..20], &[0x7f, 0xf0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtPoll {
    flags: u8,
    diag_priority: u8,
    target_port_top: u16,
    target_port_bottom: u16,
    esta_filter: u16,
    oem_filter: u16,
}

impl ArtPoll {
    pub const HEADER: Header = Header::standard(OpCode::Poll);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_diag_priority(mut self, priority: u8) -> Self {
        self.diag_priority = priority;
        self
    }

    pub fn with_target_port_range(mut self, top: u16, bottom: u16) -> Self {
        self.target_port_top = top;
        self.target_port_bottom = bottom;
        self
    }

    pub fn with_esta_filter(mut self, esta: u16) -> Self {
        self.esta_filter = esta;
        self
    }

    pub fn with_oem_filter(mut self, oem: u16) -> Self {
        self.oem_filter = oem;
        self
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn diag_priority(&self) -> u8 {
        self.diag_priority
    }

    pub fn target_port_range(&self) -> (u16, u16) {
        (self.target_port_top, self.target_port_bottom)
    }

    pub fn esta_filter(&self) -> u16 {
        self.esta_filter
    }

    pub fn oem_filter(&self) -> u16 {
        self.oem_filter
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(layout::LEN);
        Self::HEADER.write(&mut writer);
        writer.put_u8(&layout::FLAGS, self.flags);
        writer.put_u8(&layout::DIAG_PRIORITY, self.diag_priority);
        writer.put_u16(&layout::TARGET_TOP, self.target_port_top);
        writer.put_u16(&layout::TARGET_BOTTOM, self.target_port_bottom);
        writer.put_u16(&layout::ESTA_MAN, self.esta_filter);
        writer.put_u16(&layout::OEM, self.oem_filter);
        writer.finish()
    }
}

impl OutboundPacket for ArtPoll {
    const OPCODE: OpCode = OpCode::Poll;

    fn encode(&self) -> Vec<u8> {
        ArtPoll::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::ArtPoll;

    #[test]
    fn default_poll_is_header_plus_zeros() {
        let bytes = ArtPoll::new().encode();
        assert_eq!(&bytes[..12], b"Art-Net\0\x00\x20\x00\x0e");
        assert!(bytes[12..].iter().all(|&b| b == 0));
        assert_eq!(bytes.len(), 22);
    }

    #[test]
    fn fields_are_big_endian_in_order() {
        let bytes = ArtPoll::new()
            .with_flags(0x06)
            .with_diag_priority(0x10)
            .with_target_port_range(0x0102, 0x0304)
            .with_esta_filter(0x0506)
            .with_oem_filter(0x0708)
            .encode();
        assert_eq!(
            &bytes[12..],
            &[0x06, 0x10, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }
}
