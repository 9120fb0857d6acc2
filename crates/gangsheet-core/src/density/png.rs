//! PNG pHYs chunk density extraction.

use super::{read_u32_be, read_u8};

/// First four bytes of the PNG signature.
const SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// Inches per meter, for converting pixels-per-meter to DPI.
const INCHES_PER_METER: f64 = 39.3701;

/// Check if the buffer starts with the PNG signature.
pub(super) fn matches(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == SIGNATURE
}

/// Scan the chunk list for a pHYs density declaration.
///
/// Chunks are `<length:u32 BE><type:4 ASCII><data><crc:u32>` starting after
/// the 8-byte signature. Only the first pHYs chunk is consulted: a unit other
/// than meters stops the scan without an answer.
pub(super) fn parse_dpi(bytes: &[u8]) -> Option<u32> {
    let mut offset = 8usize;
    while offset < bytes.len() {
        let length = read_u32_be(bytes, offset)?;
        let chunk_type = bytes.get(offset + 4..offset + 8)?;
        if chunk_type == b"pHYs" {
            let pixels_per_unit_x = read_u32_be(bytes, offset + 8)?;
            let unit_specifier = read_u8(bytes, offset + 16)?;
            if unit_specifier == 1 {
                return Some((f64::from(pixels_per_unit_x) / INCHES_PER_METER).round() as u32);
            }
            break;
        }
        offset = (offset + 12).checked_add(length as usize)?;
    }
    None
}
