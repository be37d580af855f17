//! Line and table-row extraction strategies.
//!
//! Free-text pages go through [`PageScanner`], which carries the current
//! plate across lines the way the source statements lay out their blocks
//! (plate on one line, charges on the following ones). Table rows go
//! through the context-free [`extract_row`], which requires everything on
//! the row itself.

use crate::document::TableRow;
use crate::models::RawRecord;

use super::rules::patterns::{HEADER_MARKERS, TOTAL_MARKER};
use super::rules::{
    clean_amount, clean_date, clean_plate, find_amount, find_amounts, find_date, find_plate,
};

/// Context-carrying scanner for free-text page lines.
///
/// Holds one piece of state: the plate most recently seen on this page.
/// A `TOTAL R$` line closes the current block and clears it.
#[derive(Debug, Default)]
pub struct PageScanner {
    current_plate: Option<String>,
}

impl PageScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a page's lines in order, emitting at most one record per line.
    pub fn scan_page(&mut self, lines: &[String], page: u32) -> Vec<RawRecord> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| self.scan_line(line, page, idx + 1))
            .collect()
    }

    fn scan_line(&mut self, line: &str, page: u32, line_num: usize) -> Option<RawRecord> {
        if line.trim().is_empty() {
            return None;
        }

        if HEADER_MARKERS.iter().any(|marker| line.contains(marker)) {
            return None;
        }

        if line.trim().starts_with(TOTAL_MARKER) {
            self.current_plate = None;
            return None;
        }

        // A plate on the line always takes over the context
        if let Some(found) = find_plate(line) {
            self.current_plate = Some(clean_plate(found));
        }

        let plate = self.current_plate.clone()?;
        let date = find_date(line)?;

        let amounts = find_amounts(line);
        // The trailing token is usually a quantity, not the amount
        let amount = match amounts.len() {
            0 => return None,
            1 => amounts[0],
            n => amounts[n - 2],
        };

        Some(RawRecord {
            plate,
            date: clean_date(date),
            amount: clean_amount(amount),
            source_text: line.to_string(),
            page,
            line_ref: format!("line_{line_num}"),
        })
    }
}

/// Context-free extraction from a single synthetic line.
///
/// Requires a plate plus at least one of date/amount; missing date becomes
/// empty, missing amount becomes `0,00`.
pub fn extract_line(line: &str, page: u32, line_ref: &str) -> Option<RawRecord> {
    let plate = find_plate(line)?;
    let date = find_date(line);
    let amount = find_amount(line);

    if date.is_none() && amount.is_none() {
        return None;
    }

    Some(RawRecord {
        plate: clean_plate(plate),
        date: date.map(clean_date).unwrap_or_default(),
        amount: amount
            .map(clean_amount)
            .unwrap_or_else(|| "0,00".to_string()),
        source_text: line.to_string(),
        page,
        line_ref: line_ref.to_string(),
    })
}

/// Flatten a table row into a synthetic line and extract context-free.
pub fn extract_row(row: &TableRow, page: u32, table_num: usize) -> Option<RawRecord> {
    let line = row
        .iter()
        .filter_map(|cell| cell.as_deref())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if line.is_empty() {
        return None;
    }

    extract_line(&line, page, &format!("table_{table_num}"))
}
