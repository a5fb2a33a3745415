//! Pipeline failure taxonomy.
//!
//! Only resource and collaborator failures live here. Heuristic misses
//! (no date on any line, no QR code, an unparseable amount) are not
//! errors — they surface as `None` / empty fields and the pipeline still
//! returns a structurally valid record.

use thiserror::Error;

/// Fatal errors a scan invocation can report to the caller.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Rejected before any stage runs.
    #[error("input is {actual} bytes, above the {limit} byte limit")]
    OversizedInput { actual: usize, limit: usize },

    /// The source bytes are not a decodable image. Not retried.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Decoded fine but has zero width or height — not a usable image.
    #[error("image has zero width or height")]
    EmptyImage,

    /// The OCR collaborator failed. Its message is carried verbatim.
    #[error("text recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// Failure reported by an [`OcrEngine`](crate::OcrEngine) implementation.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct OcrError {
    pub message: String,
}

impl OcrError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
