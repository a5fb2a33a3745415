//! recibo-scan — receipt OCR ingestion pipeline.
//!
//! Takes one uploaded receipt image and produces a transaction-form
//! record: amount, date, description, category, payment method. The
//! stages run in strict sequence — EXIF orientation read, decode +
//! upright resize, QR detection, binarization, external OCR, per-line
//! field heuristics, QR-vs-OCR reconciliation.
//!
//! The OCR engine is an injected collaborator ([`OcrEngine`]); the QR
//! decoder is too ([`QrDecoder`]), with a pure-Rust default
//! ([`RqrrDecoder`]). No business logic lives in this file — only module
//! wiring and the public surface.

mod error;
pub mod extract;
pub mod ocr;
mod pipeline;
pub mod preprocess;
pub mod qr;
mod reconcile;
mod record;

pub use error::{OcrError, ScanError};
pub use extract::{extract_fields, AmountCandidate, ParsedFields, DESCRIPTION_MAX_CHARS};
pub use ocr::{OcrEngine, OcrText, ProgressEvent, ProgressFn, ScanStage, DEFAULT_LANGUAGE};
pub use pipeline::{ReceiptScanner, ScanConfig, MAX_INPUT_BYTES};
pub use qr::{parse_payload, QrDecoder, QrFinding, RqrrDecoder};
pub use reconcile::{reconcile, FALLBACK_DESCRIPTION, QR_DESCRIPTION};
pub use record::{Category, ExtractionRecord, PaymentMethod};
