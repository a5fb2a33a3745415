//! Hard-threshold binarization for thermal-printer receipts.
//!
//! Receipts are low-contrast print on a light, often yellowed background.
//! A fixed luminance threshold replaced the earlier mild contrast stretch
//! (factor ~1.2 around mid-gray) after it proved better for OCR on faded
//! paper. The threshold is the single policy knob of this stage — swap
//! the value (or the whole stage) without touching its neighbors.
//!
//! Runs after QR detection: thresholding destroys the fine modules a QR
//! decoder needs.

use image::{Rgba, RgbaImage};

/// Default luminance cutoff. Below → black, at/above → white.
pub const DEFAULT_THRESHOLD: u8 = 160;

/// Force every pixel to pure black or pure white by thresholded
/// luminance (0.299 R + 0.587 G + 0.114 B). Dimensions are preserved,
/// alpha is forced opaque.
pub fn binarize(mut image: RgbaImage, threshold: u8) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        let value = if luma < f32::from(threshold) { 0 } else { 255 };
        *pixel = Rgba([value, value, value, 255]);
    }
    image
}
