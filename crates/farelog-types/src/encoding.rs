//! Little-endian fixed-width encoding helpers for the persisted
//! record formats.
//!
//! Every persisted farelog structure is a fixed-size envelope built
//! from these primitives: integers are little-endian, text fields are
//! UTF-8 padded to a fixed width with NUL bytes.

/// Append a `u32` in little-endian order.
pub fn append_u32_le(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Append a `u64` in little-endian order.
pub fn append_u64_le(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Read a little-endian `u32`. Returns `None` if `data` is shorter
/// than 4 bytes.
#[must_use]
pub fn read_u32_le(data: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = data.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Read a little-endian `u64`. Returns `None` if `data` is shorter
/// than 8 bytes.
#[must_use]
pub fn read_u64_le(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(..8)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

/// Append `text` padded with NUL bytes to exactly `width` bytes.
///
/// Oversized input is truncated at a character boundary so the field
/// always holds valid UTF-8 and decodes cleanly.
pub fn append_padded_text(buf: &mut Vec<u8>, text: &str, width: usize) {
    let mut take = text.len().min(width);
    while !text.is_char_boundary(take) {
        take -= 1;
    }
    buf.extend_from_slice(&text.as_bytes()[..take]);
    buf.resize(buf.len() + (width - take), 0);
}

/// Decode a NUL-padded fixed-width text field.
///
/// Returns `None` if the bytes before the first NUL are not valid
/// UTF-8.
#[must_use]
pub fn read_padded_text(data: &[u8]) -> Option<String> {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    std::str::from_utf8(&data[..end]).ok().map(str::to_owned)
}
