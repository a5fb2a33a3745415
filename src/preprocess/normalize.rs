//! Decode, upright, and bound the source image.
//!
//! Produces the working pixel buffer every downstream stage reads. The
//! width cap is the primary memory/CPU bound for the whole pipeline —
//! OCR and QR decoding cost scale with pixel count.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::error::ScanError;

/// Width cap for the working buffer. Raised from 1024 after low-DPI
/// receipt scans lost small print; 2048 keeps glyphs legible while
/// bounding memory on large phone photos.
pub const MAX_WIDTH: u32 = 2048;

/// Decode `bytes`, apply the EXIF `orientation` transform, and cap the
/// result at `max_width` preserving aspect ratio.
///
/// Orientation codes 5–8 involve a 90°/270° rotation, so the output
/// dimensions are swapped relative to the source exactly for those codes.
/// Decode failures and zero-dimension sources are fatal.
pub fn normalize(bytes: &[u8], orientation: u8, max_width: u32) -> Result<RgbaImage, ScanError> {
    let decoded = image::load_from_memory(bytes)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ScanError::EmptyImage);
    }

    let upright = apply_orientation(decoded, orientation);
    let bounded = if upright.width() > max_width {
        upright.resize(max_width, u32::MAX, FilterType::Triangle)
    } else {
        upright
    };
    Ok(bounded.to_rgba8())
}

/// The eight EXIF cases: identity, horizontal flip, 180°, vertical flip,
/// transpose, 90°, anti-transpose, 270°. Unknown codes are identity.
fn apply_orientation(img: DynamicImage, orientation: u8) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
