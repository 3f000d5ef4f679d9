//! Batch command - extract orders from every document matching a glob.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use freight_core::{dispatch, ExtractedRecord, JsonFileSink, OrderSink, SinkError};

use super::process::attachment_name;
use super::{assistants, load_config, load_lines, DocumentKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting the order documents
    #[arg(required = true)]
    input: String,

    /// Directory receiving one JSON file per accepted order
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write summary.csv with the outcome of every document
    #[arg(long)]
    summary: bool,

    /// Keep going after a document fails
    #[arg(long)]
    continue_on_error: bool,
}

/// Collects accepted orders and, with an output directory, writes them to disk.
struct BatchSink {
    files: Option<JsonFileSink>,
    accepted: Vec<ExtractedRecord>,
}

impl BatchSink {
    fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            files: output_dir.map(JsonFileSink::new),
            accepted: Vec::new(),
        }
    }

    fn last_written(&self) -> Option<&Path> {
        self.files
            .as_ref()
            .and_then(|files| files.written().last())
            .map(PathBuf::as_path)
    }
}

impl OrderSink for BatchSink {
    fn create_order(&mut self, record: ExtractedRecord) -> Result<(), SinkError> {
        if let Some(files) = &mut self.files {
            files.create_order(record.clone())?;
        }
        self.accepted.push(record);
        Ok(())
    }
}

/// One line of summary.csv.
#[derive(Serialize)]
struct ReportRow {
    document: String,
    status: &'static str,
    assistant: String,
    order_reference: String,
    customer: String,
    output: String,
    error: String,
}

impl ReportRow {
    fn accepted(
        document: &str,
        assistant: String,
        record: &ExtractedRecord,
        output: Option<&Path>,
    ) -> Self {
        Self {
            document: document.to_string(),
            status: "accepted",
            assistant,
            order_reference: record.order_reference.clone(),
            customer: record.customer.details.company.clone(),
            output: output.map(|p| p.display().to_string()).unwrap_or_default(),
            error: String::new(),
        }
    }

    fn failed(document: &str, error: &anyhow::Error) -> Self {
        Self {
            document: document.to_string(),
            status: "failed",
            assistant: String::new(),
            order_reference: String::new(),
            customer: String::new(),
            output: String::new(),
            error: error.to_string(),
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let assistants = assistants(&config);

    let mut documents: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file() && DocumentKind::of(path).is_some())
        .collect();
    documents.sort();

    if documents.is_empty() {
        anyhow::bail!("No order documents match {}", args.input);
    }
    println!("{} Found {} documents", style("ℹ").blue(), documents.len());

    let mut sink = BatchSink::new(args.output_dir.clone());
    let mut report = Vec::with_capacity(documents.len());
    let mut by_assistant: BTreeMap<String, usize> = BTreeMap::new();

    let progress = ProgressBar::new(documents.len() as u64).with_style(
        ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")?,
    );

    for path in &documents {
        let name = attachment_name(path).unwrap_or_default();
        progress.set_message(name.to_string());

        let outcome = load_lines(path, &config).and_then(|lines| {
            dispatch(&assistants, &lines, Some(name), &mut sink).map_err(anyhow::Error::from)
        });

        match outcome {
            Ok(assistant) => {
                info!("{} accepted by {} assistant", path.display(), assistant);
                *by_assistant.entry(assistant.clone()).or_default() += 1;

                if let Some(record) = sink.accepted.last() {
                    report.push(ReportRow::accepted(name, assistant, record, sink.last_written()));
                }
            }
            Err(e) if args.continue_on_error => {
                warn!("Skipping {}: {}", path.display(), e);
                report.push(ReportRow::failed(name, &e));
            }
            Err(e) => {
                progress.abandon();
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        }

        progress.inc(1);
    }
    progress.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join("summary.csv");
        write_report(&summary_path, &report)?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let failed: Vec<_> = report.iter().filter(|row| row.status == "failed").collect();
    println!(
        "{} {} of {} documents accepted",
        style("✓").green(),
        sink.accepted.len(),
        documents.len()
    );
    for (assistant, count) in &by_assistant {
        println!("   {}: {}", assistant, count);
    }
    for row in failed {
        println!("   {} {}: {}", style("✗").red(), row.document, row.error);
    }

    Ok(())
}

fn write_report(path: &Path, rows: &[ReportRow]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
