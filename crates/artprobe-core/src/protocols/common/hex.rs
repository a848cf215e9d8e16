/// Render bytes as colon-separated lowercase hex pairs (`00:1a:2b`).
///
/// Every byte is exactly two digits wide, including values below `0x10`.
pub fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Render bytes as a list of quoted `0xNN` strings, e.g. `["0x01", "0xC0"]`.
pub fn byte_list(bytes: &[u8]) -> String {
    let items = bytes
        .iter()
        .map(|b| format!("\"0x{:02X}\"", b))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}
