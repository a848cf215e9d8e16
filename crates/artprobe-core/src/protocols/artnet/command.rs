use super::error::FieldRangeError;
use super::header::{Header, OpCode};
use super::layout::command as layout;
use super::writer::ArtNetWriter;
use super::OutboundPacket;

/// Free-text command addressed to every manufacturer (ESTA `0xFFFF`).
///
/// The length field counts the text plus its NUL terminator; the packet is
/// sized per command rather than from a fixed schema.
///
/// # Examples
/// ```
/// use artprobe_core::ArtCommand;
///
/// let bytes = ArtCommand::new("SWOFF")?.encode();
/// assert_eq!(&bytes[14..16], &[0x00, 0x06]);
/// assert_eq!(&bytes[16..], b"SWOFF\0");
/// # Ok::<(), artprobe_core::FieldRangeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtCommand {
    text: String,
    length: u16,
}

impl ArtCommand {
    pub const HEADER: Header = Header::standard(OpCode::Command);

    /// # Errors
    /// Returns `FieldRangeError` when the text plus terminator exceeds the
    /// 512-byte command data limit.
    pub fn new(text: impl Into<String>) -> Result<Self, FieldRangeError> {
        let text = text.into();
        let data_len = text.len() + 1;
        if data_len > layout::MAX_DATA_LEN {
            return Err(FieldRangeError {
                field: layout::LENGTH.name,
                value: data_len as u64,
                max: layout::MAX_DATA_LEN as u64,
            });
        }
        Ok(Self {
            text,
            length: data_len as u16,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encoded data length, terminator included.
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn encoded_len(&self) -> usize {
        layout::DATA_OFFSET + usize::from(self.length)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(layout::DATA_OFFSET);
        Self::HEADER.write(&mut writer);
        writer.put_u16(&layout::ESTA_MAN, layout::ESTA_WILDCARD);
        writer.put_u16(&layout::LENGTH, self.length);
        writer.extend(self.text.as_bytes());
        writer.extend(&[0]);
        writer.finish()
    }
}

impl OutboundPacket for ArtCommand {
    const OPCODE: OpCode = OpCode::Command;

    fn encode(&self) -> Vec<u8> {
        ArtCommand::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::ArtCommand;
    use crate::protocols::artnet::layout::command as layout;

    #[test]
    fn length_counts_terminator() {
        let cmd = ArtCommand::new("SWOFF").unwrap();
        assert_eq!(cmd.length(), 6);
        let bytes = cmd.encode();
        assert_eq!(bytes.len(), cmd.encoded_len());
        assert_eq!(bytes.len(), 12 + 4 + 6);
        assert_eq!(&bytes[8..10], &[0x00, 0x24]);
        assert_eq!(&bytes[12..14], &[0xff, 0xff]);
        assert_eq!(&bytes[14..16], &[0x00, 0x06]);
        assert_eq!(&bytes[16..], b"SWOFF\0");
    }

    #[test]
    fn empty_command_is_just_terminator() {
        let bytes = ArtCommand::new("").unwrap().encode();
        assert_eq!(&bytes[14..], &[0x00, 0x01, 0x00]);
    }

    #[test]
    fn longest_accepted_command() {
        let text = "x".repeat(layout::MAX_DATA_LEN - 1);
        let cmd = ArtCommand::new(text).unwrap();
        assert_eq!(usize::from(cmd.length()), layout::MAX_DATA_LEN);
    }

    #[test]
    fn oversized_command_is_rejected() {
        let text = "x".repeat(layout::MAX_DATA_LEN);
        let err = ArtCommand::new(text).unwrap_err();
        assert_eq!(err.field, "length");
        assert_eq!(err.value, 513);
        assert_eq!(err.max, 512);
    }
}
