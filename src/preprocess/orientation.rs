//! EXIF orientation tag reader.
//!
//! Best-effort metadata extraction from the leading bytes of a JPEG
//! container. Anything unexpected — non-JPEG input, a truncated segment,
//! a directory without the tag — degrades to [`DEFAULT_ORIENTATION`].
//! This stage never fails the pipeline.

/// "No transform". Returned whenever the tag cannot be recovered.
pub const DEFAULT_ORIENTATION: u8 = 1;

/// How much of the file prefix is worth scanning. Exif APP1 segments sit
/// right after SOI in practice; 64 KB covers every real-world writer.
const SCAN_PREFIX: usize = 64 * 1024;

/// TIFF tag id for image orientation.
const ORIENTATION_TAG: u16 = 0x0112;

/// Read the orientation code (1–8) from the leading bytes of an image
/// file, or [`DEFAULT_ORIENTATION`] if it cannot be determined.
pub fn read_orientation(bytes: &[u8]) -> u8 {
    let prefix = &bytes[..bytes.len().min(SCAN_PREFIX)];
    scan_jpeg_markers(prefix).unwrap_or(DEFAULT_ORIENTATION)
}

/// Walk JPEG marker segments looking for an Exif APP1 payload.
fn scan_jpeg_markers(data: &[u8]) -> Option<u8> {
    // SOI
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        // Standalone markers carry no length word.
        if marker == 0x01 || (0xD0..=0xD8).contains(&marker) {
            pos += 2;
            continue;
        }
        // Start of scan — no metadata past this point.
        if marker == 0xDA {
            return None;
        }
        let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if len < 2 || pos + 2 + len > data.len() {
            return None;
        }
        let segment = &data[pos + 4..pos + 2 + len];
        if marker == 0xE1 && segment.len() > 6 && &segment[..6] == b"Exif\0\0" {
            return read_tiff_orientation(&segment[6..]);
        }
        pos += 2 + len;
    }
    None
}

/// Find tag 0x0112 in IFD0 of an embedded TIFF structure.
fn read_tiff_orientation(tiff: &[u8]) -> Option<u8> {
    if tiff.len() < 8 {
        return None;
    }
    let big_endian = match &tiff[..2] {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };
    let read_u16 = |at: usize| -> Option<u16> {
        let b: [u8; 2] = tiff.get(at..at + 2)?.try_into().ok()?;
        Some(if big_endian {
            u16::from_be_bytes(b)
        } else {
            u16::from_le_bytes(b)
        })
    };
    let read_u32 = |at: usize| -> Option<u32> {
        let b: [u8; 4] = tiff.get(at..at + 4)?.try_into().ok()?;
        Some(if big_endian {
            u32::from_be_bytes(b)
        } else {
            u32::from_le_bytes(b)
        })
    };

    // TIFF magic, then the offset of IFD0 relative to the header start.
    if read_u16(2)? != 42 {
        return None;
    }
    let ifd = read_u32(4)? as usize;
    let entries = read_u16(ifd)? as usize;
    for i in 0..entries {
        let entry = ifd.checked_add(2 + i * 12)?;
        if read_u16(entry)? == ORIENTATION_TAG {
            // SHORT values sit left-justified in the value/offset field.
            let value = read_u16(entry + 8)?;
            return (1..=8).contains(&value).then_some(value as u8);
        }
    }
    None
}
