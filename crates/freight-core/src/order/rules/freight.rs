//! Freight price extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::AMOUNT_WITH_CURRENCY;
use super::{FieldExtractor, LineMatch};
use crate::models::order::{Currency, FreightCharge};

/// Finds the first amount followed by a currency code.
pub struct FreightExtractor;

impl FreightExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FreightExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for FreightExtractor {
    type Output = Option<LineMatch<FreightCharge>>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        lines.iter().enumerate().find_map(|(index, line)| {
            let caps = AMOUNT_WITH_CURRENCY.captures(line)?;
            let freight_price = parse_amount(&caps[1])?;
            let freight_currency = Currency::from_code(&caps[2])?;

            trace!("Freight on line {}: {} {}", index, freight_price, freight_currency.as_str());
            Some(LineMatch::new(
                FreightCharge {
                    freight_price,
                    freight_currency,
                },
                index,
            ))
        })
    }
}

/// Extract the freight price and currency.
pub fn extract_freight(lines: &[String]) -> Option<FreightCharge> {
    FreightExtractor::new().extract(lines).map(|m| m.value)
}

/// Parse an amount written with either decimal separator (e.g. "1.250,50" or "1250.50").
///
/// When both separators appear, the last one is the decimal separator. A lone
/// comma is always a decimal separator.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if cleaned.matches(',').count() == 1 => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.250,50"), Some(dec("1250.50")));
        assert_eq!(parse_amount("1,250.50"), Some(dec("1250.50")));
        assert_eq!(parse_amount("1250.50"), Some(dec("1250.50")));
        assert_eq!(parse_amount("1250,5"), Some(dec("1250.5")));
        assert_eq!(parse_amount("1 250,50"), Some(dec("1250.50")));
        assert_eq!(parse_amount("1.250.000"), Some(dec("1250000")));
        assert_eq!(parse_amount("900"), Some(dec("900")));
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_both_notations_normalize_the_same() {
        let a = extract_freight(&lines(&["Total: 1.250,50 EUR"])).unwrap();
        let b = extract_freight(&lines(&["1250.50 EUR"])).unwrap();

        assert_eq!(a.freight_price, dec("1250.5"));
        assert_eq!(a, b);
        assert_eq!(a.freight_currency, Currency::Eur);
    }

    #[test]
    fn test_preceding_numbers_are_not_joined_to_amount() {
        let found = extract_freight(&lines(&["Order 12345 450 EUR"])).unwrap();
        assert_eq!(found.freight_price, dec("450"));

        let found = extract_freight(&lines(&["33 pallets, tour 12 900 EUR"])).unwrap();
        assert_eq!(found.freight_price, dec("900"));

        let found = extract_freight(&lines(&["Ref 7 1.250,50 EUR"])).unwrap();
        assert_eq!(found.freight_price, dec("1250.50"));
    }

    #[test]
    fn test_currency_is_upper_cased() {
        let found = extract_freight(&lines(&["Price 800 pln"])).unwrap();
        assert_eq!(found.freight_currency, Currency::Pln);
        assert_eq!(found.freight_price, dec("800"));
    }

    #[test]
    fn test_first_matching_line_wins() {
        let doc = lines(&["Nordwerk GmbH", "Freight 950,00 EUR", "Toll 45 EUR"]);
        let found = FreightExtractor::new().extract(&doc).unwrap();

        assert_eq!(found.line, 1);
        assert_eq!(found.value.freight_price, dec("950"));
    }

    #[test]
    fn test_no_price() {
        assert_eq!(extract_freight(&lines(&["Price on request", "CHF 200"])), None);
        assert_eq!(extract_freight(&lines(&["1250 EURO-pallets"])), None);
    }
}
