//! Order reference extraction.

use tracing::trace;

use super::patterns::{ORDER_REFERENCE_PATTERNS, REFERENCE_KEYWORD};
use super::{FieldExtractor, LineMatch};

/// Finds the order reference, scanning the document top to bottom.
///
/// Within one line the patterns are tried from most to least specific, so a
/// labeled reference beats a bare number on the same line, but an earlier line
/// always beats a later one.
pub struct OrderReferenceExtractor;

impl OrderReferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    fn match_line(&self, line: &str) -> Option<String> {
        ORDER_REFERENCE_PATTERNS.iter().find_map(|pattern| {
            pattern
                .captures_iter(line)
                .map(|caps| caps[1].trim_matches(|c: char| c == '*' || c.is_whitespace()).to_string())
                .find(|candidate| !candidate.is_empty() && !REFERENCE_KEYWORD.is_match(candidate))
        })
    }
}

impl Default for OrderReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OrderReferenceExtractor {
    type Output = Option<LineMatch<String>>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        lines.iter().enumerate().find_map(|(index, line)| {
            self.match_line(line).map(|reference| {
                trace!("Order reference on line {}: {}", index, reference);
                LineMatch::new(reference, index)
            })
        })
    }
}

/// Extract the order reference, if any.
pub fn extract_order_reference(lines: &[String]) -> Option<String> {
    OrderReferenceExtractor::new().extract(lines).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labeled_reference() {
        assert_eq!(
            extract_order_reference(&lines(&["Order No: AB123456"])),
            Some("AB123456".to_string())
        );
        assert_eq!(
            extract_order_reference(&lines(&["Auftragsnummer: 4711-22"])),
            Some("4711-22".to_string())
        );
        assert_eq!(
            extract_order_reference(&lines(&["Užsakymas Nr. LT-778"])),
            Some("LT-778".to_string())
        );
    }

    #[test]
    fn test_asterisk_delimited_reference() {
        assert_eq!(
            extract_order_reference(&lines(&["**XJ-9001**"])),
            Some("XJ-9001".to_string())
        );
    }

    #[test]
    fn test_letter_prefixed_code() {
        assert_eq!(
            extract_order_reference(&lines(&["Shipment TR2024001"])),
            Some("TR2024001".to_string())
        );
    }

    #[test]
    fn test_bare_long_number() {
        assert_eq!(
            extract_order_reference(&lines(&["12345678"])),
            Some("12345678".to_string())
        );
        assert_eq!(extract_order_reference(&lines(&["123456"])), None);
    }

    #[test]
    fn test_earlier_line_beats_more_specific_pattern() {
        let doc = lines(&["**XJ-9001**", "Order No: AB123456"]);
        let found = OrderReferenceExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "XJ-9001");
        assert_eq!(found.line, 0);
    }

    #[test]
    fn test_keyword_alone_is_not_a_reference() {
        assert_eq!(extract_order_reference(&lines(&["Order No:"])), None);
        assert_eq!(
            extract_order_reference(&lines(&["Order No:", "Ref: K-55"])),
            Some("K-55".to_string())
        );
    }

    #[test]
    fn test_no_candidate() {
        assert_eq!(extract_order_reference(&lines(&["Nordwerk GmbH", ""])), None);
        assert_eq!(extract_order_reference(&[]), None);
    }
}
