//! Layout-agnostic fallback order extraction.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::order::{CustomerInfo, ExtractedRecord};

use super::rules::{
    CargoExtractor, CustomerExtractor, FieldExtractor, FreightExtractor, LocationExtractor,
    LocationRole, OrderReferenceExtractor, TransportNumberExtractor,
};
use super::{OrderAssistant, OrderSink};

/// Fallback assistant that accepts any document and extracts what it can.
pub struct CommonOrderAssistant {
    customer: CustomerExtractor,
    loading: LocationExtractor,
    destination: LocationExtractor,
    cargo: CargoExtractor,
    reference: OrderReferenceExtractor,
    transport: TransportNumberExtractor,
    freight: FreightExtractor,
}

impl CommonOrderAssistant {
    /// Create an assistant with default settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create an assistant from extraction settings.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            customer: CustomerExtractor::new(),
            loading: LocationExtractor::from_config(LocationRole::Loading, config),
            destination: LocationExtractor::from_config(LocationRole::Destination, config),
            cargo: CargoExtractor::new().with_default_title(config.default_cargo_title.clone()),
            reference: OrderReferenceExtractor::new(),
            transport: TransportNumberExtractor::new(),
            freight: FreightExtractor::new(),
        }
    }

    /// Run every field extractor and merge the results into one record.
    ///
    /// Hard-stop conditions abort immediately in the order customer, loading,
    /// destination, reference. Transport numbers and freight are optional;
    /// cargo falls back to a placeholder entry.
    pub fn extract_record(
        &self,
        lines: &[String],
        attachment_filename: Option<&str>,
    ) -> Result<ExtractedRecord, ExtractionError> {
        let start = Instant::now();
        info!("Extracting order from {} lines", lines.len());

        let record = self.merge(lines, attachment_filename).inspect_err(|e| {
            warn!("Order extraction stopped: {}", e);
        })?;
        record.validate()?;

        debug!(
            "Extracted order {} ({} loading, {} destination, {} cargo) in {}ms",
            record.order_reference,
            record.loading_locations.len(),
            record.destination_locations.len(),
            record.cargos.len(),
            start.elapsed().as_millis()
        );
        Ok(record)
    }

    fn merge(
        &self,
        lines: &[String],
        attachment_filename: Option<&str>,
    ) -> Result<ExtractedRecord, ExtractionError> {
        let customer = self.customer.extract(lines)?;
        debug!("Customer: {} (line {})", customer.value, customer.line);

        let loading_locations = self.loading.extract(lines)?;
        let destination_locations = self.destination.extract(lines)?;
        let cargos = self.cargo.extract(lines);

        let reference = self
            .reference
            .extract(lines)
            .ok_or(ExtractionError::MissingOrderReference)?;
        debug!("Order reference: {} (line {})", reference.value, reference.line);

        let transport_numbers = self.transport.extract(lines);
        if transport_numbers.is_none() {
            debug!("No transport numbers found");
        }

        let freight = self.freight.extract(lines).map(|m| m.value);
        if freight.is_none() {
            debug!("No freight price found");
        }

        Ok(ExtractedRecord {
            customer: CustomerInfo::company(customer.value),
            order_reference: reference.value,
            loading_locations,
            destination_locations,
            cargos,
            transport_numbers,
            freight,
            attachment_filenames: vec![attachment_filename.unwrap_or_default().to_lowercase()],
        })
    }
}

impl Default for CommonOrderAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderAssistant for CommonOrderAssistant {
    fn name(&self) -> &str {
        "common"
    }

    fn validate_format(&self, _lines: &[String]) -> bool {
        true
    }

    fn process_lines(
        &self,
        lines: &[String],
        attachment_filename: Option<&str>,
        sink: &mut dyn OrderSink,
    ) -> crate::Result<()> {
        let record = self.extract_record(lines, attachment_filename)?;
        sink.create_order(record)?;
        Ok(())
    }
}
