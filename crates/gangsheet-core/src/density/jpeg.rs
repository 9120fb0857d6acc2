//! JFIF APP0 density extraction.

use super::{read_u16_be, read_u8};

/// JPEG start-of-image marker.
const SOI: [u8; 2] = [0xFF, 0xD8];

/// APP0, the segment a JFIF density declaration lives in.
const MARKER_APP0: u8 = 0xE0;

// Field positions within an APP0 segment, measured from its 0xFF marker byte.
const APP0_UNIT_OFFSET: usize = 9;
const APP0_DENSITY_OFFSET: usize = 10;

/// Check if the buffer starts with the JPEG start-of-image marker.
pub(super) fn matches(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[..2] == SOI
}

/// Walk the marker-segment chain looking for a JFIF density declaration.
///
/// Each segment is `0xFF <marker> <size:u16 BE>`, where `size` counts itself
/// but not the marker pair. A byte other than 0xFF where a marker should sit
/// means the chain is broken and the walk gives up.
///
/// Units 1 (inch) and 2 (cm) both report the X-density figure verbatim.
pub(super) fn parse_dpi(bytes: &[u8]) -> Option<u32> {
    let mut offset = 2usize;
    while offset < bytes.len() {
        if read_u8(bytes, offset)? != 0xFF {
            return None;
        }
        let marker = read_u8(bytes, offset + 1)?;
        let size = read_u16_be(bytes, offset + 2)?;
        if marker == MARKER_APP0 {
            let unit = read_u8(bytes, offset + APP0_UNIT_OFFSET)?;
            let density = read_u16_be(bytes, offset + APP0_DENSITY_OFFSET)?;
            if unit == 1 || unit == 2 {
                return Some(u32::from(density));
            }
        }
        offset += 2 + size as usize;
    }
    None
}
