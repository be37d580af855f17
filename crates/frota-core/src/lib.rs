//! Core library for fleet billing statement extraction.
//!
//! This crate provides:
//! - Field recognizers for vehicle plates, dates and monetary values
//! - A robust numeric normalizer for noisy regional amount formats
//! - Context-aware line extraction and context-free table-row extraction
//! - Aggregation of raw observations into one row per (plate, date)

pub mod document;
pub mod error;
pub mod models;
pub mod statement;

use tracing::debug;

pub use document::{Page, PageSource, Table, TableRow};
pub use error::{FrotaError, Result, SourceError};
pub use models::{AggregatedRecord, RawRecord};
pub use statement::rules::{format_amount, parse_amount, ParsedAmount};
pub use statement::{summarize, StatementSummary};

use statement::{aggregate, extract_row, PageScanner};

/// The aggregated output of one document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One row per (plate, date), sorted by key.
    pub records: Vec<AggregatedRecord>,
}

impl Extraction {
    /// Summary statistics over the aggregated rows.
    pub fn summary(&self) -> StatementSummary {
        summarize(&self.records)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run the full pipeline over converter output.
///
/// Tables and free text of the same page both contribute records; the plate
/// context of the line scanner never crosses page boundaries. A document
/// with no extractable content yields an empty (not erroneous) result.
pub fn extract_pages(pages: &[Page]) -> Extraction {
    let mut raw: Vec<RawRecord> = Vec::new();

    for page in pages {
        debug!("processing page {}", page.number);

        for (table_idx, table) in page.tables.iter().enumerate() {
            for row in table {
                if let Some(record) = extract_row(row, page.number, table_idx + 1) {
                    raw.push(record);
                }
            }
        }

        if !page.lines.is_empty() {
            let mut scanner = PageScanner::new();
            raw.extend(scanner.scan_page(&page.lines, page.number));
        }
    }

    Extraction {
        records: aggregate(&raw),
    }
}

/// Extract a document obtained from a [`PageSource`].
pub fn extract_document(source: &dyn PageSource) -> Result<Extraction> {
    let pages = source.pages()?;
    Ok(extract_pages(&pages))
}
