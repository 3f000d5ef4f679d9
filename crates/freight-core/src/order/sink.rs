//! Order sinks.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::OrderSink;
use crate::error::SinkError;
use crate::models::order::ExtractedRecord;

/// Keeps accepted orders in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<ExtractedRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ExtractedRecord> {
        self.records
    }
}

impl OrderSink for MemorySink {
    fn create_order(&mut self, record: ExtractedRecord) -> Result<(), SinkError> {
        self.records.push(record);
        Ok(())
    }
}

/// Writes each order as pretty-printed JSON into a directory.
///
/// Files are named after the order reference; characters outside
/// `[A-Za-z0-9_-]` are replaced with `_`. A reference seen again by the same
/// sink gets a `-2`, `-3`, ... suffix instead of replacing the earlier file.
#[derive(Debug)]
pub struct JsonFileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OrderSink for JsonFileSink {
    fn create_order(&mut self, record: ExtractedRecord) -> Result<(), SinkError> {
        let stem: String = record
            .order_reference
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            return Err(SinkError::Rejected("order has no reference".to_string()));
        }

        fs::create_dir_all(&self.dir)?;
        let mut path = self.dir.join(format!("{}.json", stem));
        let mut copy = 2;
        while self.written.contains(&path) {
            path = self.dir.join(format!("{}-{}.json", stem, copy));
            copy += 1;
        }
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;

        debug!("Wrote order {} to {}", record.order_reference, path.display());
        self.written.push(path);
        Ok(())
    }
}
