//! Record types produced by the extraction pipeline.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation extracted from a single line or table row.
///
/// Immutable once created; consumed by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Canonical vehicle plate ("placa"), e.g. `ABC-1234` or `ABC-1D23`.
    pub plate: String,

    /// Canonical date (`DD/MM/YYYY`) or empty when unknown.
    pub date: String,

    /// Canonical decimal-comma amount, or empty.
    pub amount: String,

    /// The originating line, kept for audit.
    pub source_text: String,

    /// 1-based page number.
    pub page: u32,

    /// Provenance tag, e.g. `line_42` or `table_2`.
    pub line_ref: String,
}

/// One output row per distinct `(plate, date)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedRecord {
    /// Canonical vehicle plate.
    pub plate: String,

    /// Canonical date, or empty.
    pub date: String,

    /// Formatted sum of all contributing amounts, e.g. `1.234,56`.
    pub total_amount: String,

    /// Exact sum used for arithmetic and statistics.
    pub numeric_total: Decimal,

    /// Number of raw records folded into this row.
    pub record_count: u32,

    /// All pages that contributed.
    pub pages: BTreeSet<u32>,

    /// Synthesized audit string.
    pub source_text: String,

    /// Provenance tag for the aggregated row.
    pub line_ref: String,
}

impl AggregatedRecord {
    /// Representative page for export rows: the lowest contributing page.
    pub fn page(&self) -> u32 {
        self.pages.iter().next().copied().unwrap_or(0)
    }
}
