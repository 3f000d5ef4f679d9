//! PDF text loading.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::order::DocumentLines;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract the document as ordered lines.
    fn extract_lines(&self) -> Result<DocumentLines> {
        self.extract_text().map(|text| DocumentLines::from_text(&text))
    }
}
