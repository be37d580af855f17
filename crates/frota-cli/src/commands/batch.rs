//! Batch processing command for multiple converter output files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use frota_core::{extract_document, Extraction};

use crate::source::{supported_extension, FileSource};

use super::process::{format_extraction, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Also generate a combined summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    extraction: Option<Extraction>,
    error: Option<String>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| supported_extension(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let result = match extract_document(&FileSource::new(&path)) {
            Ok(extraction) => {
                if extraction.is_empty() {
                    warn!("no records extracted from {}", path.display());
                }
                BatchResult {
                    path,
                    extraction: Some(extraction),
                    error: None,
                }
            }
            Err(e) => {
                if !args.continue_on_error {
                    pb.finish_and_clear();
                    anyhow::bail!("Failed to process {}: {e}", path.display());
                }
                error!("failed to process {}: {e}", path.display());
                BatchResult {
                    path,
                    extraction: None,
                    error: Some(e.to_string()),
                }
            }
        };

        results.push(result);
        pb.inc(1);
    }

    pb.finish_and_clear();

    // Write per-file outputs
    for result in &results {
        let Some(extraction) = &result.extraction else {
            continue;
        };

        let output = format_extraction(extraction, args.format)?;
        match &args.output_dir {
            Some(dir) => {
                let ext = match args.format {
                    OutputFormat::Csv => "csv",
                    OutputFormat::Json => "json",
                    OutputFormat::Text => "txt",
                };
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                fs::write(dir.join(format!("{stem}.{ext}")), output)?;
            }
            None => print!("{}", output),
        }
    }

    if args.summary {
        let summary = summary_csv(&results)?;
        match &args.output_dir {
            Some(dir) => fs::write(dir.join("summary.csv"), summary)?,
            None => print!("{}", summary),
        }
    }

    let processed = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - processed;
    println!(
        "{} Processed {} files in {:.1}s ({} failed)",
        style("✓").green(),
        processed,
        start.elapsed().as_secs_f64(),
        failed
    );

    Ok(())
}

fn summary_csv(results: &[BatchResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["file", "rows", "distinct_plates", "grand_total", "error"])?;

    for result in results {
        let file = result.path.display().to_string();
        match (&result.extraction, &result.error) {
            (Some(extraction), _) => {
                let summary = extraction.summary();
                wtr.write_record([
                    file.as_str(),
                    &summary.total_records.to_string(),
                    &summary.distinct_plates.to_string(),
                    &frota_core::format_amount(summary.grand_total),
                    "",
                ])?;
            }
            (None, Some(error)) => {
                wtr.write_record([file.as_str(), "0", "0", "0,00", error.as_str()])?;
            }
            (None, None) => {}
        }
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
