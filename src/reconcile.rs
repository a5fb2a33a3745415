//! QR-vs-OCR reconciliation into the final record.
//!
//! QR payloads are structured fiscal data; OCR is a heuristic over noisy
//! glyphs. Where both speak, the QR wins. Where neither speaks, fields
//! default so the record is always structurally valid.

use chrono::NaiveDate;

use crate::extract::ParsedFields;
use crate::qr::QrFinding;
use crate::record::ExtractionRecord;

/// Description when nothing usable came from the OCR lines.
pub const FALLBACK_DESCRIPTION: &str = "Despesa detectada";

/// Description when the record originated from a QR code alone.
pub const QR_DESCRIPTION: &str = "Compra via QR Code";

/// Fold the QR finding into the extracted fields and apply defaults.
pub fn reconcile(
    fields: &ParsedFields,
    qr: Option<&QrFinding>,
    today: NaiveDate,
) -> ExtractionRecord {
    let qr_amount = qr.and_then(|finding| finding.amount);
    let amount = qr_amount
        .or_else(|| fields.best_amount().map(|candidate| candidate.value))
        .map(|value| format!("{value:.2}"))
        .unwrap_or_default();

    let description = match (&fields.description, qr) {
        (Some(text), _) => text.clone(),
        (None, Some(_)) => QR_DESCRIPTION.to_string(),
        (None, None) => FALLBACK_DESCRIPTION.to_string(),
    };

    let date = fields
        .date
        .clone()
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

    ExtractionRecord {
        amount,
        date,
        description,
        category: fields
            .category
            .map(|c| c.as_tag().to_string())
            .unwrap_or_default(),
        payment_method: fields
            .payment_method
            .map(|p| p.as_tag().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::AmountCandidate;
    use crate::record::{Category, PaymentMethod};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn candidate(value: f64, score: u32) -> AmountCandidate {
        AmountCandidate {
            value,
            score,
            source_line: String::new(),
        }
    }

    #[test]
    fn qr_amount_always_overrides_the_ocr_selection() {
        let fields = ParsedFields {
            amount_candidates: vec![candidate(99.90, 100)],
            ..Default::default()
        };
        let qr = QrFinding {
            raw: "x|45.90|y".to_string(),
            amount: Some(45.90),
        };
        let record = reconcile(&fields, Some(&qr), today());
        assert_eq!(record.amount, "45.90");
    }

    #[test]
    fn qr_without_amount_leaves_the_ocr_selection() {
        let fields = ParsedFields {
            amount_candidates: vec![candidate(99.90, 100)],
            ..Default::default()
        };
        let qr = QrFinding {
            raw: "hello".to_string(),
            amount: None,
        };
        let record = reconcile(&fields, Some(&qr), today());
        assert_eq!(record.amount, "99.90");
    }

    #[test]
    fn qr_only_record_gets_the_qr_placeholder_description() {
        let qr = QrFinding {
            raw: "x|45.90|y".to_string(),
            amount: Some(45.90),
        };
        let record = reconcile(&ParsedFields::default(), Some(&qr), today());
        assert_eq!(record.amount, "45.90");
        assert_eq!(record.description, QR_DESCRIPTION);
    }

    #[test]
    fn extracted_description_beats_both_placeholders() {
        let fields = ParsedFields {
            description: Some("Padaria Trigal".to_string()),
            ..Default::default()
        };
        let qr = QrFinding {
            raw: "x".to_string(),
            amount: None,
        };
        let record = reconcile(&fields, Some(&qr), today());
        assert_eq!(record.description, "Padaria Trigal");
    }

    #[test]
    fn empty_extraction_defaults_every_field() {
        let record = reconcile(&ParsedFields::default(), None, today());
        assert_eq!(record.amount, "");
        assert_eq!(record.date, "2024-03-12");
        assert_eq!(record.description, FALLBACK_DESCRIPTION);
        assert_eq!(record.category, "");
        assert_eq!(record.payment_method, "");
    }

    #[test]
    fn extracted_date_beats_the_today_default() {
        let fields = ParsedFields {
            date: Some("2023-06-05".to_string()),
            ..Default::default()
        };
        let record = reconcile(&fields, None, today());
        assert_eq!(record.date, "2023-06-05");
    }

    #[test]
    fn tags_are_rendered_for_detected_category_and_payment() {
        let fields = ParsedFields {
            category: Some(Category::Alimentacao),
            payment_method: Some(PaymentMethod::Pix),
            ..Default::default()
        };
        let record = reconcile(&fields, None, today());
        assert_eq!(record.category, "alimentacao");
        assert_eq!(record.payment_method, "pix");
    }

    #[test]
    fn amounts_render_with_two_fractional_digits() {
        let fields = ParsedFields {
            amount_candidates: vec![candidate(7.5, 10)],
            ..Default::default()
        };
        let record = reconcile(&fields, None, today());
        assert_eq!(record.amount, "7.50");
    }
}
