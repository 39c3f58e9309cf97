//! Price extraction for ticket texts.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor, RuleSet};
use crate::models::ticket::Price;

/// Price field extractor.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    rules: RuleSet,
}

impl PriceExtractor {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<Price>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let (rule, caps) = self.rules.first_match(text)?;
        let amount = caps.get(1)?;
        let full_match = caps.get(0)?;

        trace!("price rule {} matched {:?}", rule, full_match.as_str());

        let text = amount.as_str().trim().to_string();
        let price = Price {
            amount: parse_german_amount(&text),
            text,
        };

        Some(ExtractionMatch::new(price, rule))
    }
}

/// Parse a German-formatted amount (e.g. "1.234,56", "1 234,56" or "1234.56").
pub fn parse_german_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // "1.234,56": dots group thousands
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        // "1,234.56": commas group thousands
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        // "1.234" alone reads as thousands, "12.50" as decimals
        (None, Some(d)) if cleaned.len() - d - 1 == 3 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Format amount in German style (1.234,56).
pub fn format_german_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = digits.split_once('.') else {
        return s;
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use pretty_assertions::assert_eq;

    fn extractor() -> PriceExtractor {
        let config = ExtractionConfig::default();
        PriceExtractor::new(
            RuleSet::compile("price", &config.price_patterns, 1, config.lookbehind_chars).unwrap(),
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_german_amount() {
        assert_eq!(parse_german_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_german_amount("1 234,56"), Some(dec("1234.56")));
        assert_eq!(parse_german_amount("29,90"), Some(dec("29.90")));
        assert_eq!(parse_german_amount("29.90"), Some(dec("29.90")));
        assert_eq!(parse_german_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_german_amount("12.345.678,90"), Some(dec("12345678.90")));
        assert_eq!(parse_german_amount("abc"), None);
    }

    #[test]
    fn test_format_german_amount() {
        assert_eq!(format_german_amount(dec("1234.56")), "1.234,56");
        assert_eq!(format_german_amount(dec("12345678.9")), "12.345.678,90");
        assert_eq!(format_german_amount(dec("0")), "0,00");
        assert_eq!(format_german_amount(dec("-1234.5")), "-1.234,50");
    }

    #[test]
    fn test_extract_total_price() {
        let found = extractor().extract("Gesamtpreis 1.234,56 €").unwrap();
        assert_eq!(found.value.text, "1.234,56");
        assert_eq!(found.value.amount, Some(dec("1234.56")));
        assert_eq!(found.rule, 0);
    }

    #[test]
    fn test_extract_loose_variants() {
        let found = extractor().extract("Gesamtpreis: 1234.50 EUR").unwrap();
        assert_eq!(found.value.text, "1234.50");
        assert_eq!(found.rule, 1);

        let found = extractor().extract("Gesamtpreis\n59,90 €").unwrap();
        assert_eq!(found.value.text, "59,90");
        assert_eq!(found.rule, 0);
    }

    #[test]
    fn test_no_price() {
        assert!(extractor().extract("Preis auf Anfrage").is_none());
        assert!(extractor().extract("Gesamtpreis 59,90").is_none());
    }
}
