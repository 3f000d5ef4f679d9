//! Customer company extraction.

use tracing::trace;

use super::patterns::COMPANY_PATTERNS;
use super::{FieldExtractor, LineMatch};
use crate::error::ExtractionError;

/// Finds the first company-looking line in the document.
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = Result<LineMatch<String>, ExtractionError>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        for (index, line) in lines.iter().enumerate() {
            let line = line.trim();
            for pattern in COMPANY_PATTERNS.iter() {
                if let Some(caps) = pattern.captures(line) {
                    let company = caps[1].trim().to_string();
                    trace!("Customer candidate on line {}: {}", index, company);
                    return Ok(LineMatch::new(company, index));
                }
            }
        }

        Err(ExtractionError::MissingCustomer)
    }
}

/// Extract the customer company name.
pub fn extract_customer(lines: &[String]) -> Result<String, ExtractionError> {
    CustomerExtractor::new().extract(lines).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_company_line_wins() {
        // The suffix token needs a name in front of it, so a bare heading is skipped
        let doc = lines(&["TRANSPORT ORDER", "Nordwerk GmbH", "Baltic Haulage UAB"]);
        let found = CustomerExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "Nordwerk GmbH");
        assert_eq!(found.line, 1);
    }

    #[test]
    fn test_suffix_pattern_beats_address_pattern_on_same_line() {
        let doc = lines(&["Acme Ltd, Main Road 1, LV-1010 Riga"]);
        assert_eq!(
            extract_customer(&doc).unwrap(),
            "Acme Ltd, Main Road 1, LV-1010 Riga"
        );
    }

    #[test]
    fn test_address_line_fallback() {
        let doc = lines(&["Page 1", "Acme Freight, Hauptstrasse 5, D-12345 Berlin"]);
        assert_eq!(extract_customer(&doc).unwrap(), "Acme Freight");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let doc = lines(&["   Baltic Haulage UAB   "]);
        assert_eq!(extract_customer(&doc).unwrap(), "Baltic Haulage UAB");
    }

    #[test]
    fn test_missing_customer_is_hard_stop() {
        let doc = lines(&["Order No: AB123456", "Loading 12.03.2024"]);
        assert_eq!(extract_customer(&doc), Err(ExtractionError::MissingCustomer));
        assert_eq!(extract_customer(&[]), Err(ExtractionError::MissingCustomer));
    }
}
