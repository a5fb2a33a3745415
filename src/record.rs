//! Final extraction record + the tracker's fixed tags.
//!
//! `ExtractionRecord` is what the web client receives and pre-fills the
//! transaction form with, so it serializes with camelCase keys. Empty
//! strings mean "not detected" — never null, the form treats them as
//! untouched inputs.

use serde::{Deserialize, Serialize};

/// One scanned receipt, reduced to transaction-form fields.
///
/// Invariants: `date` is always populated (`YYYY-MM-DD`); `amount` is
/// either empty or a dot-decimal numeral with two fractional digits;
/// `description` is at most 30 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub payment_method: String,
}

/// Expense categories the extractor can infer from merchant keywords.
///
/// Mirrors the tracker's category tags. Income categories are never
/// inferred from a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Alimentacao,
    Transporte,
    Saude,
    Moradia,
    Lazer,
}

impl Category {
    /// The tag string the tracker's API expects.
    pub fn as_tag(self) -> &'static str {
        match self {
            Category::Alimentacao => "alimentacao",
            Category::Transporte => "transporte",
            Category::Saude => "saude",
            Category::Moradia => "moradia",
            Category::Lazer => "lazer",
        }
    }
}

/// Payment methods recognizable from receipt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    Card,
    Cash,
    Boleto,
}

impl PaymentMethod {
    pub fn as_tag(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Boleto => "boleto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = ExtractionRecord {
            amount: "45.90".to_string(),
            date: "2024-03-12".to_string(),
            description: "Restaurante Bom Sabor".to_string(),
            category: "alimentacao".to_string(),
            payment_method: "pix".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["paymentMethod"], "pix");
        assert_eq!(json["amount"], "45.90");
        assert!(json.get("payment_method").is_none());
    }

    #[test]
    fn tags_match_the_tracker_constants() {
        assert_eq!(Category::Alimentacao.as_tag(), "alimentacao");
        assert_eq!(PaymentMethod::Boleto.as_tag(), "boleto");
    }
}
