//! TIFF XResolution tag extraction.

/// Little-endian byte-order mark ("II").
const BYTE_ORDER_LE: [u8; 2] = [0x49, 0x49];
/// Big-endian byte-order mark ("MM").
const BYTE_ORDER_BE: [u8; 2] = [0x4D, 0x4D];

/// XResolution, a RATIONAL holding pixels per resolution unit.
const TAG_X_RESOLUTION: u16 = 0x011A;

/// Check if the buffer starts with a TIFF byte-order mark.
pub(super) fn matches(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && (bytes[..2] == BYTE_ORDER_LE || bytes[..2] == BYTE_ORDER_BE)
}

/// Scan IFD0 for an XResolution rational.
///
/// Tag entries are 12 bytes, `<tag:2><type:2><count:4><valueOrOffset:4>`, in
/// the endianness the byte-order mark declares. XResolution stores its value
/// out of line, so the value field is an offset to a numerator/denominator
/// pair of u32s. An entry whose denominator is zero is skipped rather than
/// trusted, leaving later entries a chance to answer.
pub(super) fn parse_dpi(bytes: &[u8]) -> Option<u32> {
    let little_endian = bytes.get(..2)? == BYTE_ORDER_LE;

    let ifd_offset = read_u32_at(bytes, 4, little_endian)? as usize;
    let tag_count = read_u16_at(bytes, ifd_offset, little_endian)?;

    for i in 0..tag_count as usize {
        let entry = ifd_offset.checked_add(2 + i * 12)?;
        if read_u16_at(bytes, entry, little_endian)? == TAG_X_RESOLUTION {
            let value_offset = read_u32_at(bytes, entry + 8, little_endian)? as usize;
            let numerator = read_u32_at(bytes, value_offset, little_endian)?;
            let denominator = read_u32_at(bytes, value_offset + 4, little_endian)?;
            if denominator != 0 {
                return Some((f64::from(numerator) / f64::from(denominator)).round() as u32);
            }
        }
    }
    None
}

// Endian-aware bounds-checked reads. The rest of the density module only
// deals in big-endian fields, so these stay local.

fn read_u16_at(bytes: &[u8], offset: usize, little_endian: bool) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
    Some(if little_endian {
        u16::from_le_bytes(raw)
    } else {
        u16::from_be_bytes(raw)
    })
}

fn read_u32_at(bytes: &[u8], offset: usize, little_endian: bool) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
    Some(if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}
