//! Process command - extract an order from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use freight_core::{ExtractedRecord, LocationEntry};

use super::{extract_order, load_config, load_lines};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let lines = load_lines(&args.input, &config)?;
    debug!("Document has {} lines", lines.len());

    let record = extract_order(&lines, attachment_name(&args.input), &config)?;
    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// File name recorded as the order's attachment.
pub fn attachment_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}

pub fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn companies(locations: &[LocationEntry]) -> String {
    locations
        .iter()
        .map(|l| l.company_address.company.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "order_reference",
        "customer",
        "loading_companies",
        "destination_companies",
        "package_total",
        "transport_numbers",
        "freight_price",
        "freight_currency",
        "attachment",
    ])?;

    wtr.write_record([
        record.order_reference.as_str(),
        record.customer.details.company.as_str(),
        &companies(&record.loading_locations),
        &companies(&record.destination_locations),
        &record.package_total().to_string(),
        record.transport_numbers.as_deref().unwrap_or(""),
        &record
            .freight
            .as_ref()
            .map(|f| f.freight_price.to_string())
            .unwrap_or_default(),
        record
            .freight
            .as_ref()
            .map(|f| f.freight_currency.as_str())
            .unwrap_or(""),
        record
            .attachment_filenames
            .first()
            .map(String::as_str)
            .unwrap_or(""),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_locations(output: &mut String, heading: &str, locations: &[LocationEntry]) {
    output.push_str(&format!("{}:\n", heading));
    for location in locations {
        match &location.time {
            Some(time) => output.push_str(&format!(
                "  {} ({})\n",
                location.company_address.company, time.datetime_from
            )),
            None => output.push_str(&format!("  {}\n", location.company_address.company)),
        }
    }
    output.push('\n');
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Order: {}\n", record.order_reference));
    output.push_str(&format!("Customer: {}\n", record.customer.details.company));
    output.push('\n');

    format_locations(&mut output, "Loading", &record.loading_locations);
    format_locations(&mut output, "Delivery", &record.destination_locations);

    output.push_str("Cargo:\n");
    for cargo in &record.cargos {
        output.push_str(&format!(
            "  {} x {} [{}]\n",
            cargo.package_count, cargo.title, cargo.package_type
        ));
    }

    if let Some(numbers) = &record.transport_numbers {
        output.push_str(&format!("\nTransport: {}\n", numbers));
    }
    if let Some(freight) = &record.freight {
        output.push_str(&format!(
            "\nFreight: {} {}\n",
            freight.freight_price, freight.freight_currency.as_str()
        ));
    }

    output
}
