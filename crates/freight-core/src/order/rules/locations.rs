//! Loading and delivery location extraction.

use regex::Regex;
use tracing::{debug, trace};

use super::dates::DateParser;
use super::patterns::{DATE_TOKEN, DESTINATION_KEYWORDS, LOADING_KEYWORDS, LOCATION_COMPANY};
use super::FieldExtractor;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::order::{CompanyAddress, LocationEntry, LocationTime};

/// Builds a location from the lines following a keyword.
pub struct LocationContextExtractor {
    window: usize,
    unknown_company: String,
    date_parser: DateParser,
}

impl LocationContextExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            window: config.context_window,
            unknown_company: config.unknown_company.clone(),
            date_parser: DateParser::new(),
        }
    }

    /// Set the number of lines scanned from the anchor, anchor included.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Scan the window starting at `anchor` and assemble a location.
    ///
    /// The first company line and the first parseable date are kept; later
    /// candidates in the same window are ignored. Always returns a location,
    /// falling back to the placeholder company.
    pub fn extract_context(&self, lines: &[String], anchor: usize) -> LocationEntry {
        let end = anchor.saturating_add(self.window).min(lines.len());
        let mut company: Option<String> = None;
        let mut datetime_from: Option<String> = None;

        for line in lines.get(anchor..end).unwrap_or_default() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if company.is_none() {
                if let Some(caps) = LOCATION_COMPANY.captures(line) {
                    company = Some(caps[1].trim().to_string());
                }
            }

            if datetime_from.is_none() {
                if let Some(token) = DATE_TOKEN.find(line) {
                    datetime_from = self.date_parser.parse(token.as_str());
                }
            }

            if company.is_some() && datetime_from.is_some() {
                break;
            }
        }

        LocationEntry {
            company_address: CompanyAddress {
                company: company.unwrap_or_else(|| self.unknown_company.clone()),
            },
            time: datetime_from.map(|datetime_from| LocationTime { datetime_from }),
        }
    }
}

impl Default for LocationContextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of stop a location extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRole {
    Loading,
    Destination,
}

impl LocationRole {
    fn keywords(&self) -> &'static [Regex] {
        match self {
            LocationRole::Loading => LOADING_KEYWORDS.as_slice(),
            LocationRole::Destination => DESTINATION_KEYWORDS.as_slice(),
        }
    }

    fn missing(&self) -> ExtractionError {
        match self {
            LocationRole::Loading => ExtractionError::NoLoadingLocation,
            LocationRole::Destination => ExtractionError::NoDestinationLocation,
        }
    }
}

/// Collects every loading or delivery stop in the document.
///
/// Each keyword that matches a line opens its own context window, so a line
/// such as "Loading / Pickup" yields two locations unless anchors are
/// deduplicated.
pub struct LocationExtractor {
    role: LocationRole,
    context: LocationContextExtractor,
    dedupe_anchors: bool,
}

impl LocationExtractor {
    pub fn new(role: LocationRole) -> Self {
        Self::from_config(role, &ExtractionConfig::default())
    }

    pub fn from_config(role: LocationRole, config: &ExtractionConfig) -> Self {
        Self {
            role,
            context: LocationContextExtractor::from_config(config),
            dedupe_anchors: config.dedupe_location_anchors,
        }
    }

    pub fn loading() -> Self {
        Self::new(LocationRole::Loading)
    }

    pub fn destination() -> Self {
        Self::new(LocationRole::Destination)
    }

    /// Open at most one context window per line.
    pub fn with_anchor_dedup(mut self, dedupe: bool) -> Self {
        self.dedupe_anchors = dedupe;
        self
    }
}

impl FieldExtractor for LocationExtractor {
    type Output = Result<Vec<LocationEntry>, ExtractionError>;

    fn extract(&self, lines: &[String]) -> Self::Output {
        let mut locations = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let hits = self
                .role
                .keywords()
                .iter()
                .filter(|keyword| keyword.is_match(line))
                .count();
            let windows = if self.dedupe_anchors { hits.min(1) } else { hits };

            for _ in 0..windows {
                trace!("{:?} keyword on line {}", self.role, index);
                locations.push(self.context.extract_context(lines, index));
            }
        }

        if locations.is_empty() {
            return Err(self.role.missing());
        }

        debug!("Found {} {:?} locations", locations.len(), self.role);
        Ok(locations)
    }
}
