//! Truck and trailer number extraction.

use tracing::debug;

use super::patterns::TRANSPORT_NUMBER;
use super::FieldExtractor;

/// Collects plate-like codes, one per line, deduplicated in document order.
pub struct TransportNumberExtractor;

impl TransportNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransportNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TransportNumberExtractor {
    type Output = Option<String>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        let mut numbers: Vec<String> = Vec::new();

        for line in lines {
            if let Some(caps) = TRANSPORT_NUMBER.captures(line) {
                let number = caps[1].trim().to_string();
                if !numbers.contains(&number) {
                    numbers.push(number);
                }
            }
        }

        if numbers.is_empty() {
            return None;
        }

        debug!("Found {} transport numbers", numbers.len());
        Some(numbers.join(" / "))
    }
}

/// Extract transport numbers joined with " / ".
pub fn extract_transport_numbers(lines: &[String]) -> Option<String> {
    TransportNumberExtractor::new().extract(lines)
}
