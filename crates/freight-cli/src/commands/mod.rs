//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use freight_core::models::config::FreightConfig;
use freight_core::{
    dispatch, CommonOrderAssistant, DocumentLines, ExtractedRecord, MemorySink, OrderAssistant,
    PdfExtractor, PdfProcessor,
};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("freight")
        .join("config.json")
}

/// Load the explicit config file, else the default one, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FreightConfig> {
    let default_path = default_config_path();

    let config = if let Some(path) = config_path {
        FreightConfig::from_file(Path::new(path))?
    } else if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        FreightConfig::from_file(&default_path)?
    } else {
        FreightConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// Document formats the CLI reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with an embedded text layer.
    Pdf,
    /// UTF-8 text; also assumed for files without an extension.
    Text,
}

impl DocumentKind {
    pub fn of(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt" | "text") | None => Some(DocumentKind::Text),
            Some(_) => None,
        }
    }
}

/// Read a document as ordered text lines.
pub fn load_lines(path: &Path, config: &FreightConfig) -> anyhow::Result<DocumentLines> {
    let Some(kind) = DocumentKind::of(path) else {
        anyhow::bail!("Unsupported file format: {}", path.display());
    };

    match kind {
        DocumentKind::Pdf => {
            let mut extractor = PdfExtractor::new();
            extractor.load(&fs::read(path)?)?;
            debug!("PDF has {} pages", extractor.page_count());

            if !extractor.has_text_layer(config.pdf.min_text_length) {
                anyhow::bail!(
                    "PDF has no usable text layer (scanned documents need OCR first): {}",
                    path.display()
                );
            }
            Ok(extractor.extract_lines()?)
        }
        DocumentKind::Text => Ok(DocumentLines::from_text(&fs::read_to_string(path)?)),
    }
}

/// Assistants tried for every document, most specific first.
pub fn assistants(config: &FreightConfig) -> Vec<Box<dyn OrderAssistant>> {
    vec![Box::new(CommonOrderAssistant::with_config(&config.extraction))]
}

/// Run the assistant chain over one document and return the accepted order.
pub fn extract_order(
    lines: &DocumentLines,
    attachment_filename: Option<&str>,
    config: &FreightConfig,
) -> anyhow::Result<ExtractedRecord> {
    let mut sink = MemorySink::new();
    let assistant = dispatch(&assistants(config), lines, attachment_filename, &mut sink)?;
    info!("Order extracted by {} assistant", assistant);

    sink.into_records()
        .pop()
        .ok_or_else(|| anyhow::anyhow!("assistant {} produced no order", assistant))
}
