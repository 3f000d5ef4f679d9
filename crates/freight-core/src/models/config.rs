//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::FreightError;

/// Main configuration for the freight pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreightConfig {
    /// Order extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Order extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of lines scanned from a loading/delivery keyword, keyword line included.
    pub context_window: usize,

    /// Company name used when a stop's company cannot be resolved.
    pub unknown_company: String,

    /// Title of the placeholder cargo used when no cargo line is found.
    pub default_cargo_title: String,

    /// Open only one context window per line, even when several keywords match it.
    pub dedupe_location_anchors: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: 10,
            unknown_company: "Unknown company".to_string(),
            default_cargo_title: "General cargo".to_string(),
            dedupe_location_anchors: false,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum embedded text length to consider a PDF extractable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 20 }
    }
}

impl FreightConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject settings the extractors cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.extraction.context_window == 0 {
            return Err(FreightError::Config(
                "extraction.context_window must be at least 1".to_string(),
            ));
        }
        if self.extraction.unknown_company.trim().is_empty() {
            return Err(FreightError::Config(
                "extraction.unknown_company must not be empty".to_string(),
            ));
        }
        if self.extraction.default_cargo_title.trim().is_empty() {
            return Err(FreightError::Config(
                "extraction.default_cargo_title must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Current value of a dotted key from [`CONFIG_KEYS`].
    pub fn get(&self, key: &str) -> crate::Result<String> {
        let value = match key {
            "extraction.context_window" => self.extraction.context_window.to_string(),
            "extraction.unknown_company" => self.extraction.unknown_company.clone(),
            "extraction.default_cargo_title" => self.extraction.default_cargo_title.clone(),
            "extraction.dedupe_location_anchors" => {
                self.extraction.dedupe_location_anchors.to_string()
            }
            "pdf.min_text_length" => self.pdf.min_text_length.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Change one setting by dotted key, then validate the result.
    pub fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
        match key {
            "extraction.context_window" => {
                self.extraction.context_window = parse_value(key, value)?
            }
            "extraction.unknown_company" => self.extraction.unknown_company = value.to_string(),
            "extraction.default_cargo_title" => {
                self.extraction.default_cargo_title = value.to_string()
            }
            "extraction.dedupe_location_anchors" => {
                self.extraction.dedupe_location_anchors = parse_value(key, value)?
            }
            "pdf.min_text_length" => self.pdf.min_text_length = parse_value(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }
}

/// Every key understood by [`FreightConfig::get`] and [`FreightConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "extraction.context_window",
    "extraction.unknown_company",
    "extraction.default_cargo_title",
    "extraction.dedupe_location_anchors",
    "pdf.min_text_length",
];

fn parse_value<T>(key: &str, value: &str) -> crate::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| FreightError::Config(format!("invalid value {:?} for {}: {}", value, key, e)))
}

fn unknown_key(key: &str) -> FreightError {
    FreightError::Config(format!(
        "unknown configuration key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
