//! QR collaborator boundary + default decoder.
//!
//! Fiscal receipts carry a QR code whose payload is structured data, so
//! anything recovered here outranks the OCR heuristics downstream. Runs
//! on the normalized buffer BEFORE binarization — hard thresholding
//! destroys the fine modules the detector needs.

mod payload;

pub use payload::{parse_payload, QrFinding};

use image::RgbaImage;

/// External QR decoder. `None` means no code was found — not-found is
/// never an error.
pub trait QrDecoder: Send + Sync {
    fn decode(&self, pixels: &RgbaImage) -> Option<String>;
}

/// Default decoder backed by the pure-Rust `rqrr` detector.
#[derive(Debug, Default)]
pub struct RqrrDecoder;

impl QrDecoder for RqrrDecoder {
    fn decode(&self, pixels: &RgbaImage) -> Option<String> {
        let (width, height) = pixels.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                let p = pixels.get_pixel(x as u32, y as u32).0;
                (0.299 * f32::from(p[0]) + 0.587 * f32::from(p[1]) + 0.114 * f32::from(p[2])) as u8
            });
        prepared
            .detect_grids()
            .into_iter()
            .find_map(|grid| grid.decode().ok().map(|(_meta, content)| content))
    }
}
