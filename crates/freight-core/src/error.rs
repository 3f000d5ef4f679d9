//! Error types for the freight-core library.

use thiserror::Error;

/// Main error type for the freight library.
#[derive(Error, Debug)]
pub enum FreightError {
    /// Order extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// PDF processing error.
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The order sink rejected a record.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Hard-stop conditions raised while extracting an order.
///
/// Any of these aborts the whole record. Soft absences (transport numbers,
/// freight price, per-location dates) never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No line in the document looks like a company.
    #[error("missing customer company")]
    MissingCustomer,

    /// No order reference candidate anywhere in the document.
    #[error("missing order reference")]
    MissingOrderReference,

    /// No loading keyword was found.
    #[error("no valid loading location found")]
    NoLoadingLocation,

    /// No delivery keyword was found.
    #[error("no valid destination location found")]
    NoDestinationLocation,

    /// Every assistant declined or failed the document.
    #[error("no assistant could process the document: {0}")]
    NoAssistant(String),
}

/// Errors related to PDF loading.
#[cfg(feature = "pdf")]
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised by an order sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The record could not be serialized.
    #[error("failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The record could not be written.
    #[error("failed to write order: {0}")]
    Io(#[from] std::io::Error),

    /// The sink refused the record.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Result type for the freight library.
pub type Result<T> = std::result::Result<T, FreightError>;
