//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Reads the embedded text layer of an order PDF.
pub struct PdfExtractor {
    document: Option<Document>,
    /// Bytes handed to pdf-extract; the decrypted copy for protected files.
    text_source: Vec<u8>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            document: None,
            text_source: Vec::new(),
        }
    }

    /// Whether the embedded text layer is long enough to extract from.
    ///
    /// Scanned PDFs usually carry no text at all; these need OCR upstream.
    pub fn has_text_layer(&self, min_text_length: usize) -> bool {
        let length = self
            .extract_text()
            .map(|text| text.trim().chars().count())
            .unwrap_or(0);
        debug!("PDF text layer: {} chars (minimum {})", length, min_text_length);
        length >= min_text_length
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a file protected only by an empty user password and re-serialize it.
fn unlock(doc: &mut Document) -> Result<Vec<u8>> {
    doc.decrypt("").map_err(|_| PdfError::Encrypted)?;

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Parse(format!("cannot re-serialize decrypted PDF: {e}")))?;
    Ok(bytes)
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let text_source = if doc.is_encrypted() {
            unlock(&mut doc)?
        } else {
            data.to_vec()
        };

        let pages = doc.get_pages().len();
        if pages == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded order PDF: {} pages, {} bytes", pages, text_source.len());

        self.text_source = text_source;
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map_or(0, |doc| doc.get_pages().len() as u32)
    }

    fn extract_text(&self) -> Result<String> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no PDF loaded".to_string()))?;
        pdf_extract::extract_text_from_mem(&self.text_source)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
