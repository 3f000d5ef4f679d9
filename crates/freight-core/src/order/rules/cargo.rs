//! Cargo line extraction.

use tracing::{debug, trace};

use super::packages::PackageClassifier;
use super::patterns::CARGO_QUANTITY;
use super::FieldExtractor;
use crate::models::order::CargoEntry;

/// Collects "<count> [x] <description>" lines as cargo entries.
pub struct CargoExtractor {
    classifier: PackageClassifier,
    default_title: String,
}

impl CargoExtractor {
    pub fn new() -> Self {
        Self {
            classifier: PackageClassifier::new(),
            default_title: "General cargo".to_string(),
        }
    }

    /// Set the title of the placeholder cargo.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    fn parse_line(&self, line: &str) -> Option<CargoEntry> {
        let caps = CARGO_QUANTITY.captures(line)?;
        let count: u32 = caps[1].parse().ok()?;
        let title = caps[2].trim();

        if count == 0 || title.chars().count() <= 2 {
            return None;
        }

        Some(CargoEntry {
            title: title.to_string(),
            package_count: count,
            package_type: self.classifier.classify(title),
        })
    }
}

impl Default for CargoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CargoExtractor {
    type Output = Vec<CargoEntry>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        let mut cargos: Vec<CargoEntry> = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let cargo = self.parse_line(line)?;
                trace!("Cargo on line {}: {} x {}", index, cargo.package_count, cargo.title);
                Some(cargo)
            })
            .collect();

        if cargos.is_empty() {
            debug!("No cargo lines found, using placeholder cargo");
            cargos.push(CargoEntry::general(self.default_title.clone()));
        }

        cargos
    }
}

/// Extract cargo entries; never empty.
pub fn extract_cargos(lines: &[String]) -> Vec<CargoEntry> {
    CargoExtractor::new().extract(lines)
}
