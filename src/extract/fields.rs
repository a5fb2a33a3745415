//! Per-line field heuristics over recognized receipt text.
//!
//! One fold over the lines, accumulating into [`ParsedFields`]. Every
//! field is first-match-wins across lines — except the amount, which
//! collects a candidate per line and ranks them afterwards. A miss on
//! every line is a valid outcome for every field.

use crate::extract::rules::{Rules, RULES};
use crate::ocr::OcrText;
use crate::record::{Category, PaymentMethod};

/// Output truncation limit for the description field.
pub const DESCRIPTION_MAX_CHARS: usize = 30;

/// Lines shorter than this never become the description.
const DESCRIPTION_MIN_CHARS: usize = 4;

/// Totals at or above this are treated as OCR garbage, not money.
const AMOUNT_CEILING: f64 = 50_000.0;

/// Score for a line carrying a total/pay/amount-due keyword.
const SCORE_TOTAL_LINE: u32 = 100;
/// Score for any other line with a parseable amount.
const SCORE_PLAIN_LINE: u32 = 10;

/// One parseable money value found on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    pub value: f64,
    pub score: u32,
    pub source_line: String,
}

/// Everything the heuristics recovered from the OCR text.
#[derive(Debug, Clone, Default)]
pub struct ParsedFields {
    pub amount_candidates: Vec<AmountCandidate>,
    /// `YYYY-MM-DD`, zero-padded.
    pub date: Option<String>,
    pub category: Option<Category>,
    pub payment_method: Option<PaymentMethod>,
    /// Original (never confusable-folded) text, ≤ 30 chars.
    pub description: Option<String>,
}

impl ParsedFields {
    /// The winning amount: rank by (score desc, value desc), take the
    /// first. The result is a function of the candidate set alone —
    /// insertion order never matters.
    pub fn best_amount(&self) -> Option<&AmountCandidate> {
        let mut ranked: Vec<&AmountCandidate> = self.amount_candidates.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.value.total_cmp(&a.value))
        });
        ranked.first().copied()
    }
}

/// Run the per-line heuristics over `text`.
pub fn extract_fields(text: &OcrText) -> ParsedFields {
    let rules = &*RULES;
    let mut fields = ParsedFields::default();
    for line in &text.lines {
        scan_line(rules, line, &mut fields);
    }
    log::debug!(
        "[EXTRACT] candidates={} date={} category={} payment={} description={}",
        fields.amount_candidates.len(),
        fields.date.is_some(),
        fields.category.is_some(),
        fields.payment_method.is_some(),
        fields.description.is_some(),
    );
    fields
}

fn scan_line(rules: &Rules, line: &str, fields: &mut ParsedFields) {
    let original = line.trim();
    if original.is_empty() {
        return;
    }
    // The folded copy feeds digit-shaped matching (date, amount) only;
    // human-readable fields always read the original.
    let folded = fold_confusables(original);
    let lower = original.to_lowercase();

    if fields.date.is_none() {
        fields.date = match_date(rules, &folded);
    }
    if fields.category.is_none() {
        fields.category = match_keyword_table(rules.categories, &lower);
    }
    if fields.payment_method.is_none() {
        fields.payment_method = match_keyword_table(rules.payment_methods, &lower);
    }
    if fields.description.is_none() {
        fields.description = match_description(rules, original, &folded, &lower);
    }
    if let Some(candidate) = match_amount(rules, original, &folded, &lower) {
        fields.amount_candidates.push(candidate);
    }
}

/// Fold common OCR confusables to the digits they usually stand for.
/// Only ever applied to a working copy — never to text the user sees.
pub(crate) fn fold_confusables(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'I' | 'l' | 'L' => '1',
            'S' | 's' => '5',
            'Z' | 'z' => '2',
            other => other,
        })
        .collect()
}

/// First in-bounds `DD sep MM sep YY(YY)` on the line, as `YYYY-MM-DD`.
/// Out-of-bounds triples are skipped, not fatal — scanning continues.
fn match_date(rules: &Rules, folded: &str) -> Option<String> {
    for caps in rules.date.captures_iter(folded) {
        let (Ok(day), Ok(month)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };
        let year_text = &caps[3];
        let year_parsed = if year_text.len() == 2 {
            format!("20{year_text}").parse::<u32>()
        } else {
            year_text.parse::<u32>()
        };
        let Ok(year) = year_parsed else { continue };
        if (1..=31).contains(&day) && (1..=12).contains(&month) && (2000..=2100).contains(&year) {
            return Some(format!("{year:04}-{month:02}-{day:02}"));
        }
    }
    None
}

fn match_keyword_table<T: Copy>(table: &[(T, &[&str])], lower: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(tag, _)| *tag)
}

/// A description line is human-readable merchant text: long enough, not
/// a date, not dominated by digits, and free of document boilerplate.
fn match_description(rules: &Rules, original: &str, folded: &str, lower: &str) -> Option<String> {
    if original.chars().count() < DESCRIPTION_MIN_CHARS {
        return None;
    }
    if rules.date.is_match(folded) {
        return None;
    }
    let total = folded.chars().count();
    let digits = folded.chars().filter(char::is_ascii_digit).count();
    if digits * 2 >= total {
        return None;
    }
    if rules.description_blocklist.iter().any(|kw| lower.contains(kw)) {
        return None;
    }
    Some(original.chars().take(DESCRIPTION_MAX_CHARS).collect())
}

/// A candidate per line: the first currency-shaped numeral, normalized
/// to dot-decimal, scored by whether the line names the receipt total.
fn match_amount(
    rules: &Rules,
    original: &str,
    folded: &str,
    lower: &str,
) -> Option<AmountCandidate> {
    let caps = rules.amount.captures(folded)?;
    let value = normalize_amount(&caps[1])?;
    if value <= 0.0 || value >= AMOUNT_CEILING {
        return None;
    }
    let score = if rules.total_keywords.iter().any(|kw| lower.contains(kw)) {
        SCORE_TOTAL_LINE
    } else {
        SCORE_PLAIN_LINE
    };
    Some(AmountCandidate {
        value,
        score,
        source_line: original.to_string(),
    })
}

/// Reduce a matched numeral to a parseable dot-decimal string.
///
/// When both separators appear the comma is taken as the decimal mark
/// (`1.234,56` → 1234.56) — the dominant convention on these receipts.
/// A lone dot is decimal only when exactly two digits follow it;
/// otherwise it is a thousands separator (`12.345` → 12345).
fn normalize_amount(numeral: &str) -> Option<f64> {
    let has_dot = numeral.contains('.');
    let has_comma = numeral.contains(',');
    let normalized = if has_dot && has_comma {
        numeral.replace('.', "").replace(',', ".")
    } else if has_comma {
        numeral.replace(',', ".")
    } else if has_dot {
        let fraction = numeral.rsplit('.').next().unwrap_or_default();
        if fraction.len() == 2 {
            numeral.to_string()
        } else {
            numeral.replace('.', "")
        }
    } else {
        numeral.to_string()
    };
    normalized.parse::<f64>().ok()
}
