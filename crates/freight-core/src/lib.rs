//! Core library for freight order extraction.
//!
//! This crate provides:
//! - Rule-based extraction of freight order fields (customer, loading and
//!   delivery locations, cargo, order reference, transport numbers, freight
//!   price) from line-oriented document text
//! - Order record models and completeness validation
//! - A fallback assistant that accepts any document layout
//! - PDF text loading for the command-line front end

pub mod error;
pub mod models;
pub mod order;
#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{ExtractionError, FreightError, Result, SinkError};
pub use models::config::{FreightConfig, CONFIG_KEYS};
pub use models::order::{
    CargoEntry, CompanyAddress, Currency, CustomerDetails, CustomerInfo, CustomerSide,
    DocumentLines, ExtractedRecord, FreightCharge, LocationEntry, LocationTime, PackageType,
};
pub use order::{
    dispatch, CommonOrderAssistant, JsonFileSink, MemorySink, OrderAssistant, OrderSink,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
