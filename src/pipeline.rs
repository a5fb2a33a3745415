//! Receipt scan pipeline — stage orchestration.
//!
//! One `scan` call runs the stages in strict sequence:
//! orientation → normalize → QR detect → binarize → OCR → extract →
//! reconcile. Each stage consumes the previous stage's buffer; QR
//! detection must see the buffer before binarization destroys the code
//! modules. The scanner holds no mutable state, so independent scans may
//! run concurrently.

use std::time::Instant;

use chrono::Local;

use crate::error::ScanError;
use crate::extract;
use crate::ocr::{OcrEngine, ProgressEvent, ProgressFn, ScanStage, DEFAULT_LANGUAGE};
use crate::preprocess;
use crate::qr::{self, QrDecoder};
use crate::reconcile;
use crate::record::ExtractionRecord;

/// Upload size cap, checked before any stage runs.
pub const MAX_INPUT_BYTES: usize = 15 * 1024 * 1024;

/// Policy knobs for one scanner instance.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_input_bytes: usize,
    pub max_width: u32,
    pub binarize_threshold: u8,
    /// Language hint forwarded to the OCR engine.
    pub language: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: MAX_INPUT_BYTES,
            max_width: preprocess::MAX_WIDTH,
            binarize_threshold: preprocess::DEFAULT_THRESHOLD,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// The extraction entry point: image bytes in, [`ExtractionRecord`] out.
pub struct ReceiptScanner<O, Q> {
    ocr: O,
    qr: Q,
    config: ScanConfig,
}

impl<O: OcrEngine, Q: QrDecoder> ReceiptScanner<O, Q> {
    pub fn new(ocr: O, qr: Q) -> Self {
        Self::with_config(ocr, qr, ScanConfig::default())
    }

    pub fn with_config(ocr: O, qr: Q, config: ScanConfig) -> Self {
        Self { ocr, qr, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan one uploaded receipt image.
    ///
    /// Fatal outcomes are the ones of [`ScanError`]; everything heuristic
    /// degrades to defaults inside the record. `progress` is optional
    /// telemetry — behavior is identical without it.
    pub async fn scan(
        &self,
        bytes: &[u8],
        progress: Option<&ProgressFn>,
    ) -> Result<ExtractionRecord, ScanError> {
        let pipeline_start = Instant::now();

        if bytes.len() > self.config.max_input_bytes {
            return Err(ScanError::OversizedInput {
                actual: bytes.len(),
                limit: self.config.max_input_bytes,
            });
        }

        let orientation = preprocess::read_orientation(bytes);
        log::info!("[ORIENT] code={}", orientation);

        report(progress, ScanStage::Normalize, 0);
        let stage_start = Instant::now();
        let upright = preprocess::normalize(bytes, orientation, self.config.max_width)?;
        log::info!(
            "[NORMALIZE] {}x{} in {}ms",
            upright.width(),
            upright.height(),
            stage_start.elapsed().as_millis()
        );
        report(progress, ScanStage::Normalize, 100);

        // QR first: the decoder needs the un-thresholded buffer.
        report(progress, ScanStage::QrDetect, 0);
        let stage_start = Instant::now();
        let qr_finding = self
            .qr
            .decode(&upright)
            .map(|raw| qr::parse_payload(&raw));
        match &qr_finding {
            Some(finding) => log::info!(
                "[QR] payload {} chars, amount={:?}, in {}ms",
                finding.raw.len(),
                finding.amount,
                stage_start.elapsed().as_millis()
            ),
            None => log::info!(
                "[QR] no code found in {}ms",
                stage_start.elapsed().as_millis()
            ),
        }
        report(progress, ScanStage::QrDetect, 100);

        report(progress, ScanStage::Binarize, 0);
        let stage_start = Instant::now();
        let binarized = preprocess::binarize(upright, self.config.binarize_threshold);
        log::info!(
            "[BINARIZE] threshold={} in {}ms",
            self.config.binarize_threshold,
            stage_start.elapsed().as_millis()
        );
        report(progress, ScanStage::Binarize, 100);

        // The slow stage — the engine reports its own 0-100 progress.
        report(progress, ScanStage::Recognize, 0);
        let stage_start = Instant::now();
        let text = self
            .ocr
            .recognize(&binarized, &self.config.language, progress)
            .await?;
        log::info!(
            "[OCR] {} lines in {}ms",
            text.lines.len(),
            stage_start.elapsed().as_millis()
        );
        report(progress, ScanStage::Recognize, 100);

        report(progress, ScanStage::Extract, 0);
        let fields = extract::extract_fields(&text);
        log::info!(
            "[EXTRACT] {} amount candidates, date={}, description={}",
            fields.amount_candidates.len(),
            fields.date.is_some(),
            fields.description.is_some()
        );

        let today = Local::now().date_naive();
        let record = reconcile::reconcile(&fields, qr_finding.as_ref(), today);
        log::info!(
            "[RECONCILE] amount={:?} date={} qr_override={}",
            record.amount,
            record.date,
            qr_finding.as_ref().is_some_and(|f| f.amount.is_some())
        );
        report(progress, ScanStage::Extract, 100);

        log::info!(
            "[PIPELINE] scan complete in {}ms",
            pipeline_start.elapsed().as_millis()
        );
        Ok(record)
    }
}

fn report(progress: Option<&ProgressFn>, stage: ScanStage, percent: u8) {
    if let Some(callback) = progress {
        callback(ProgressEvent { stage, percent });
    }
}
