//! Receipt field extraction domain — public API.
//!
//! Turns ordered OCR lines into a structured candidate record. All of it
//! is best-effort: heuristic misses become `None`, never errors.

mod fields;
mod rules;

pub use fields::{extract_fields, AmountCandidate, ParsedFields, DESCRIPTION_MAX_CHARS};
