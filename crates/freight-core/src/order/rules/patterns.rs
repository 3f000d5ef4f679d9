//! Regex patterns for freight order extraction.
//!
//! Patterns inside a group are ordered: the first pattern that matches wins.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Customer company: legal-entity suffix first, then a "name, street, postcode city" line
    pub static ref COMPANY_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)^(.+(?:GmbH|UAB|a\.s\.|Ltd|Inc|Corp|Company|Logistic|Transport).*)$"
        ).unwrap(),
        Regex::new(
            r"(?i)^(.+),\s*(.+),\s*([A-Z]{1,2}[-\s]?\d{4,})\s*(.+)$"
        ).unwrap(),
    ];

    // Company inside a loading/delivery block
    pub static ref LOCATION_COMPANY: Regex = Regex::new(
        r"(?i)^(.+(?:GmbH|UAB|Ltd|Inc|Corp|Company).*)$"
    ).unwrap();

    // Date token inside a loading/delivery block
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"(\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})"
    ).unwrap();

    // Order reference, most specific first
    pub static ref ORDER_REFERENCE_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)\b(?:(?:order|reference|ref|number|nummer|nr|no|auftrag(?:snummer|snr)?|užsakymo|užsakymas)\b[\s.:#]*)+([A-Z0-9][A-Z0-9\-]*)"
        ).unwrap(),
        Regex::new(r"(?i)([A-Z]{1,3}\d{6,})").unwrap(),
        Regex::new(r"\*{2,}\s*([A-Z0-9\-]+)\s*\*{2,}").unwrap(),
        Regex::new(r"(\d{7,})").unwrap(),
    ];

    // Words of the labeled reference pattern that must never be returned as the reference
    pub static ref REFERENCE_KEYWORD: Regex = Regex::new(
        r"(?i)^(?:order|reference|ref|number|nummer|nr|no|auftrag(?:snummer|snr)?|užsakymo|užsakymas)$"
    ).unwrap();

    // Loading stop keywords (English, Lithuanian, German)
    pub static ref LOADING_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)loading").unwrap(),
        Regex::new(r"(?i)pickup").unwrap(),
        Regex::new(r"(?i)pakrovimo").unwrap(),
        Regex::new(r"(?i)abhol").unwrap(),
    ];

    // Delivery stop keywords (English, Lithuanian, German)
    pub static ref DESTINATION_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)delivery").unwrap(),
        Regex::new(r"(?i)destination").unwrap(),
        Regex::new(r"(?i)iškrovimo").unwrap(),
        Regex::new(r"(?i)ablad").unwrap(),
    ];

    // "3 x Euro pallets", "12 Kartons"
    pub static ref CARGO_QUANTITY: Regex = Regex::new(
        r"(?i)^\s*(\d+)\s*x?\s*(.+)$"
    ).unwrap();

    // Truck/trailer plates such as "AB12CD" or "WX 1234"
    pub static ref TRANSPORT_NUMBER: Regex = Regex::new(
        r"(?i)\b([A-Z]{1,3}\s?\d{2,4}[A-Z]{0,3})\b"
    ).unwrap();

    // Number directly in front of a currency code (1.250,50 EUR or 1250.50 EUR).
    // Whitespace never groups digits, so "12 900 EUR" is 900.
    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"(?i)\b(\d{1,3}(?:[.,]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d+)?)\s*(EUR|USD|GBP|PLN)\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_suffix_pattern() {
        assert!(COMPANY_PATTERNS[0].is_match("Nordwerk Logistik GmbH"));
        assert!(COMPANY_PATTERNS[0].is_match("Baltic haulage uab"));
        assert!(!COMPANY_PATTERNS[0].is_match("Order No: AB123456"));
    }

    #[test]
    fn test_company_address_pattern() {
        let caps = COMPANY_PATTERNS[1]
            .captures("Acme Freight, Hauptstrasse 5, D-12345 Berlin")
            .unwrap();
        assert_eq!(&caps[1], "Acme Freight");
        assert_eq!(&caps[3], "D-12345");
    }

    #[test]
    fn test_date_token_prefers_iso_form() {
        let m = DATE_TOKEN.find("Ready 2024-03-12 08:00").unwrap();
        assert_eq!(m.as_str(), "2024-03-12");

        let m = DATE_TOKEN.find("Loading date: 12.03.2024").unwrap();
        assert_eq!(m.as_str(), "12.03.2024");
    }

    #[test]
    fn test_amount_with_thousands_separator() {
        let caps = AMOUNT_WITH_CURRENCY.captures("Total: 1.250,50 EUR").unwrap();
        assert_eq!(&caps[1], "1.250,50");
        assert_eq!(&caps[2], "EUR");

        let caps = AMOUNT_WITH_CURRENCY.captures("1250.50 eur").unwrap();
        assert_eq!(&caps[1], "1250.50");
    }

    #[test]
    fn test_amount_starts_at_number_before_currency() {
        let caps = AMOUNT_WITH_CURRENCY.captures("Order 12345 450 EUR").unwrap();
        assert_eq!(&caps[1], "450");

        let caps = AMOUNT_WITH_CURRENCY.captures("tour 12 900 EUR").unwrap();
        assert_eq!(&caps[1], "900");
    }

    #[test]
    fn test_transport_number_needs_word_boundaries() {
        assert_eq!(&TRANSPORT_NUMBER.captures("Truck AB12CD")
            .unwrap()[1], "AB12CD");
        assert!(TRANSPORT_NUMBER.captures("AB123456").is_none());
    }
}
