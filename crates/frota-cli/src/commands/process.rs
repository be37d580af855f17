//! Process command - extract records from a single converter output file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use frota_core::{extract_document, Extraction};

use crate::source::FileSource;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (JSON page dump, plain text, or text-layer PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Print summary statistics to stderr
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV output
    Csv,
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extraction = extract_document(&FileSource::new(&args.input))?;

    if extraction.is_empty() {
        eprintln!(
            "{} No records extracted - check that the document has extractable text",
            style("!").yellow()
        );
    }

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.summary {
        let summary = extraction.summary();
        eprintln!();
        eprintln!(
            "{} {} rows, {} plates, grand total R$ {}",
            style("ℹ").blue(),
            summary.total_records,
            summary.distinct_plates,
            frota_core::format_amount(summary.grand_total)
        );
    }

    Ok(())
}

pub fn format_extraction(extraction: &Extraction, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&extraction.records)?),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &Extraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "plate",
        "date",
        "total_amount",
        "source_text",
        "page",
        "line_ref",
        "record_count",
        "numeric_total",
    ])?;

    for record in &extraction.records {
        wtr.write_record([
            record.plate.as_str(),
            record.date.as_str(),
            record.total_amount.as_str(),
            record.source_text.as_str(),
            &record.page().to_string(),
            record.line_ref.as_str(),
            &record.record_count.to_string(),
            &record.numeric_total.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(extraction: &Extraction) -> String {
    let summary = extraction.summary();
    let mut output = String::new();

    output.push_str(&format!("Rows (plate+date): {}\n", summary.total_records));
    output.push_str(&format!("Distinct plates:   {}\n", summary.distinct_plates));
    output.push_str(&format!("Rows with date:    {}\n", summary.with_date));
    output.push_str(&format!("Rows with amount:  {}\n", summary.with_amount));
    output.push_str(&format!(
        "Grand total:       R$ {}\n",
        frota_core::format_amount(summary.grand_total)
    ));
    output.push('\n');

    for record in &extraction.records {
        output.push_str(&format!(
            "{} | {} | R$ {} ({} records, page {})\n",
            record.plate,
            if record.date.is_empty() { "-" } else { &record.date },
            record.total_amount,
            record.record_count,
            record.page()
        ));
    }

    output
}
