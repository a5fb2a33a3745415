//! Fiscal-receipt QR payload interpretation.
//!
//! Brazilian NFC-e codes point at a consultation URL whose `p` query
//! parameter carries pipe-delimited fields; the receipt total is the
//! first field shaped like `\d+\.\d{2}`. Older SAT coupons embed the
//! pipe-delimited string directly.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Exact two-decimal numeric field, the fiscal convention for totals.
static TOTAL_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d{2}$").unwrap());

/// What a decoded QR payload contributed to the extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct QrFinding {
    /// Decoded payload, verbatim.
    pub raw: String,
    /// Receipt total recovered from the payload fields, when present.
    pub amount: Option<f64>,
}

/// Interpret a decoded payload string. Never fails — an unrecognized
/// payload simply yields a finding without an amount.
pub fn parse_payload(raw: &str) -> QrFinding {
    let effective = effective_payload(raw);
    let amount = effective
        .split('|')
        .find(|field| TOTAL_FIELD.is_match(field))
        .and_then(|field| field.parse::<f64>().ok())
        .filter(|value| *value > 0.0);
    QrFinding {
        raw: raw.to_string(),
        amount,
    }
}

/// For URL payloads the interesting part is the `p` query parameter;
/// fall back to the raw string when it is missing or the URL is mangled.
fn effective_payload(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        if let Ok(parsed) = Url::parse(raw) {
            if let Some((_, value)) = parsed.query_pairs().find(|(key, _)| key == "p") {
                return value.into_owned();
            }
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_delimited_payload_yields_the_total() {
        let finding = parse_payload("35240112345678000190650010000012341|2|1|45.90|AbCdEf");
        assert_eq!(finding.amount, Some(45.90));
    }

    #[test]
    fn url_payload_reads_the_p_parameter() {
        let finding = parse_payload(
            "https://www.fazenda.sp.gov.br/nfce/qrcode?p=35240112345678000190%7C2%7C1%7C45.90%7Chash",
        );
        assert_eq!(finding.amount, Some(45.90));
        assert!(finding.raw.starts_with("https://"));
    }

    #[test]
    fn url_without_p_falls_back_to_the_raw_string() {
        let finding = parse_payload("https://example.com/consulta?x=1");
        assert_eq!(finding.amount, None);
    }

    #[test]
    fn first_two_decimal_field_wins() {
        let finding = parse_payload("key|3|12.5|100.00|45.90");
        assert_eq!(finding.amount, Some(100.00));
    }

    #[test]
    fn fields_must_match_exactly_two_decimals() {
        assert_eq!(parse_payload("a|45.9|b").amount, None);
        assert_eq!(parse_payload("a|45.909|b").amount, None);
        assert_eq!(parse_payload("a|45,90|b").amount, None);
    }

    #[test]
    fn zero_total_is_not_a_finding() {
        assert_eq!(parse_payload("a|0.00|b").amount, None);
    }

    #[test]
    fn payload_without_pipes_has_no_amount() {
        let finding = parse_payload("hello receipt");
        assert_eq!(finding.amount, None);
        assert_eq!(finding.raw, "hello receipt");
    }
}
