//! OCR collaborator boundary.
//!
//! The pipeline does not ship a text recognizer. Callers bind whatever
//! engine they have (Tesseract, a platform vision framework, a hosted
//! service) behind [`OcrEngine`]; tests use an in-memory fake. The engine
//! receives the binarized buffer and a language hint, and may forward
//! progress — the slow stage of every scan is here.

use async_trait::async_trait;
use image::RgbaImage;

use crate::error::OcrError;

/// Language hint handed to the engine. The tracker's receipts are
/// Brazilian, so Portuguese is the default.
pub const DEFAULT_LANGUAGE: &str = "por";

/// Recognized text as ordered lines, top to bottom of the source image.
/// May be empty — empty is a valid OCR result, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrText {
    pub lines: Vec<String>,
}

impl OcrText {
    /// Split a flat engine transcript into lines, preserving order.
    pub fn from_plain_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Pipeline stage names surfaced through progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Normalize,
    QrDetect,
    Binarize,
    Recognize,
    Extract,
}

impl ScanStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanStage::Normalize => "normalize",
            ScanStage::QrDetect => "qr-detect",
            ScanStage::Binarize => "binarize",
            ScanStage::Recognize => "recognize",
            ScanStage::Extract => "extract",
        }
    }
}

/// Progress telemetry. Optional — the pipeline behaves identically with
/// or without a listener. Within one stage `percent` is monotonically
/// non-decreasing, 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub stage: ScanStage,
    pub percent: u8,
}

/// Callback receiving [`ProgressEvent`]s.
pub type ProgressFn = dyn Fn(ProgressEvent) + Send + Sync;

/// External text-recognition engine.
///
/// Failure here is fatal to the scan invocation and is surfaced to the
/// caller as [`ScanError::Ocr`](crate::ScanError::Ocr); the pipeline
/// never retries. Implementations should report recognition progress via
/// `progress` using [`ScanStage::Recognize`].
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(
        &self,
        image: &RgbaImage,
        language: &str,
        progress: Option<&ProgressFn>,
    ) -> Result<OcrText, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_plain_text_preserves_line_order() {
        let text = OcrText::from_plain_text("MERCADO PAGUE MENOS\n12/03/2024\nTOTAL R$ 45,90");
        assert_eq!(text.lines.len(), 3);
        assert_eq!(text.lines[0], "MERCADO PAGUE MENOS");
        assert_eq!(text.lines[2], "TOTAL R$ 45,90");
    }

    #[test]
    fn whitespace_only_transcript_is_empty() {
        assert!(OcrText::from_plain_text("  \n\t\n").is_empty());
        assert!(OcrText::default().is_empty());
        assert!(!OcrText::from_plain_text("x").is_empty());
    }
}
