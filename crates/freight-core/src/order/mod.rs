//! Freight order extraction module.

mod parser;
pub mod rules;
mod sink;

pub use parser::CommonOrderAssistant;
pub use sink::{JsonFileSink, MemorySink};

use tracing::{debug, warn};

use crate::error::{ExtractionError, FreightError, SinkError};
use crate::models::order::ExtractedRecord;

/// Receives accepted order records, e.g. to persist them.
pub trait OrderSink {
    /// Take ownership of one complete order.
    fn create_order(&mut self, record: ExtractedRecord) -> std::result::Result<(), SinkError>;
}

/// A document-specific order extractor.
pub trait OrderAssistant {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether this assistant recognizes the document layout.
    fn validate_format(&self, lines: &[String]) -> bool;

    /// Extract an order and hand it to `sink` exactly once.
    fn process_lines(
        &self,
        lines: &[String],
        attachment_filename: Option<&str>,
        sink: &mut dyn OrderSink,
    ) -> crate::Result<()>;
}

/// Run assistants in order until one produces an order.
///
/// Assistants that do not recognize the layout are skipped. An extraction
/// failure moves on to the next assistant; any other failure (e.g. the sink
/// refusing the record) is returned immediately. Returns the name of the
/// assistant that succeeded.
pub fn dispatch(
    assistants: &[Box<dyn OrderAssistant>],
    lines: &[String],
    attachment_filename: Option<&str>,
    sink: &mut dyn OrderSink,
) -> crate::Result<String> {
    let mut last_failure: Option<ExtractionError> = None;

    for assistant in assistants {
        if !assistant.validate_format(lines) {
            debug!("Assistant {} does not recognize the document", assistant.name());
            continue;
        }

        match assistant.process_lines(lines, attachment_filename, sink) {
            Ok(()) => return Ok(assistant.name().to_string()),
            Err(FreightError::Extraction(e)) => {
                warn!("Assistant {} failed: {}", assistant.name(), e);
                last_failure = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    let reason = last_failure
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no assistant accepted the document".to_string());
    Err(ExtractionError::NoAssistant(reason).into())
}
