//! Immutable extraction rule tables.
//!
//! Compiled once per process and handed to the extractor by reference —
//! never rebuilt per scan. Keyword tables are lowercase substrings in
//! the receipts' language (Brazilian Portuguese), listed with and
//! without accents because OCR drops diacritics unpredictably.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{Category, PaymentMethod};

pub struct Rules {
    /// `DD sep MM sep YY(YY)` with separators `/ - .`.
    pub date: Regex,
    /// Currency-shaped numeral, tolerant of an OCR-mangled `R$` prefix
    /// and of both separator conventions (`1.234,56` / `1,234.56`).
    pub amount: Regex,
    /// Merchant/venue keywords per category; table order is the
    /// tie-break order, first table entry with a hit wins.
    pub categories: &'static [(Category, &'static [&'static str])],
    pub payment_methods: &'static [(PaymentMethod, &'static [&'static str])],
    /// Lines carrying any of these never become the description.
    pub description_blocklist: &'static [&'static str],
    /// A line carrying one of these holds the receipt total, not a
    /// line item — its amount candidate gets the high score tier.
    pub total_keywords: &'static [&'static str],
}

pub static RULES: Lazy<Rules> = Lazy::new(|| Rules {
    date: Regex::new(r"(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})").unwrap(),
    amount: Regex::new(
        r"(?i)(?:r\s?[\$s5]|p\$)?\s*:?\s*(\d{1,3}(?:[.,]\d{3})+[.,]\d{2}|\d+,\d{2}|\d+\.\d{2,3})",
    )
    .unwrap(),
    categories: &[
        (
            Category::Alimentacao,
            &[
                "mercado",
                "supermercado",
                "padaria",
                "restaurante",
                "lanchonete",
                "pizzaria",
                "acougue",
                "açougue",
                "hortifruti",
                "ifood",
            ],
        ),
        (
            Category::Transporte,
            &[
                "posto",
                "combustivel",
                "combustível",
                "gasolina",
                "etanol",
                "uber",
                "99app",
                "99pop",
                "estacionamento",
                "pedagio",
                "pedágio",
            ],
        ),
        (
            Category::Saude,
            &[
                "farmacia",
                "farmácia",
                "drogaria",
                "clinica",
                "clínica",
                "laboratorio",
                "laboratório",
                "hospital",
            ],
        ),
        (
            Category::Moradia,
            &[
                "energia",
                "eletropaulo",
                "sabesp",
                "condominio",
                "condomínio",
                "aluguel",
                "internet",
                "telefonia",
                "claro",
                "vivo",
                "tim ",
            ],
        ),
        (
            Category::Lazer,
            &["cinema", "netflix", "spotify", "teatro", "show", "ingresso"],
        ),
    ],
    payment_methods: &[
        (PaymentMethod::Pix, &["pix"]),
        (
            PaymentMethod::Card,
            &[
                "cartao",
                "cartão",
                "credito",
                "crédito",
                "debito",
                "débito",
                "visa",
                "mastercard",
                "elo",
            ],
        ),
        (PaymentMethod::Cash, &["dinheiro", "especie", "espécie"]),
        (PaymentMethod::Boleto, &["boleto"]),
    ],
    description_blocklist: &[
        "cnpj",
        "cpf",
        "cupom fiscal",
        "nota fiscal",
        "nfc-e",
        "nfce",
        "danfe",
        "sat ",
        "extrato",
        "codigo",
        "código",
        "descricao",
        "descrição",
        "qtd",
        "vl unit",
        "vl.unit",
    ],
    total_keywords: &["total", "pagar", "valor"],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_pattern_captures_three_groups() {
        let caps = RULES.date.captures("emitida em 12/03/2024 14:02").unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[2], "03");
        assert_eq!(&caps[3], "2024");
    }

    #[test]
    fn date_pattern_accepts_all_three_separators() {
        for line in ["12/03/24", "12-03-24", "12.03.24"] {
            assert!(RULES.date.is_match(line), "{}", line);
        }
    }

    #[test]
    fn amount_pattern_captures_the_numeral_after_a_mangled_prefix() {
        // S→5 folding turns "RS" into "R5"; the prefix must still match.
        let caps = RULES.amount.captures("TOTA1 R5 45,90").unwrap();
        assert_eq!(&caps[1], "45,90");
    }

    #[test]
    fn amount_pattern_handles_grouped_thousands() {
        let caps = RULES.amount.captures("VALOR 1.234,56").unwrap();
        assert_eq!(&caps[1], "1.234,56");
    }
}
