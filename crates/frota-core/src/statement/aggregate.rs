//! Aggregation of raw records into one row per (plate, date).

use std::collections::{BTreeSet, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AggregatedRecord, RawRecord};

use super::rules::{format_amount, parse_amount};

struct Group {
    plate: String,
    date: String,
    total: Decimal,
    pages: BTreeSet<u32>,
    count: u32,
}

/// Fold raw records into one [`AggregatedRecord`] per `(plate, date)` key.
///
/// Amounts are normalized and summed exactly; records with an empty plate
/// are silently dropped. The result is sorted ascending by `(plate, date)`.
pub fn aggregate(records: &[RawRecord]) -> Vec<AggregatedRecord> {
    let mut groups: HashMap<String, Group> = HashMap::new();

    for record in records {
        let plate = record.plate.trim();
        if plate.is_empty() {
            continue;
        }
        let date = record.date.trim();

        let group = groups
            .entry(format!("{plate}|{date}"))
            .or_insert_with(|| Group {
                plate: plate.to_string(),
                date: date.to_string(),
                total: Decimal::ZERO,
                pages: BTreeSet::new(),
                count: 0,
            });

        group.total += parse_amount(&record.amount).value();
        group.pages.insert(record.page);
        group.count += 1;
    }

    debug!("aggregated {} raw records into {} groups", records.len(), groups.len());

    let mut result: Vec<AggregatedRecord> = groups
        .into_values()
        .map(|group| {
            let total_amount = format_amount(group.total);
            let source_text = if group.count > 1 {
                format!(
                    "PLACA: {} | DATA: {} | TOTAL: R$ {} | REGISTROS: {}",
                    group.plate, group.date, total_amount, group.count
                )
            } else {
                format!(
                    "PLACA: {} | DATA: {} | TOTAL: R$ {}",
                    group.plate, group.date, total_amount
                )
            };

            AggregatedRecord {
                line_ref: format!("plate_{}_date_{}", group.plate, group.date),
                plate: group.plate,
                date: group.date,
                total_amount,
                numeric_total: group.total,
                record_count: group.count,
                pages: group.pages,
                source_text,
            }
        })
        .collect();

    result.sort_by(|a, b| (&a.plate, &a.date).cmp(&(&b.plate, &b.date)));
    result
}

/// Summary statistics over the aggregated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Number of aggregated rows.
    pub total_records: usize,

    /// Number of distinct plates.
    pub distinct_plates: usize,

    /// Rows with a non-empty date.
    pub with_date: usize,

    /// Rows with a non-empty amount.
    pub with_amount: usize,

    /// Grand total across all rows, re-normalized from the display strings.
    pub grand_total: Decimal,
}

/// Compute summary statistics for a set of aggregated records.
pub fn summarize(records: &[AggregatedRecord]) -> StatementSummary {
    let plates: HashSet<&str> = records.iter().map(|r| r.plate.as_str()).collect();

    StatementSummary {
        total_records: records.len(),
        distinct_plates: plates.len(),
        with_date: records.iter().filter(|r| !r.date.is_empty()).count(),
        with_amount: records.iter().filter(|r| !r.total_amount.is_empty()).count(),
        grand_total: records
            .iter()
            .map(|r| parse_amount(&r.total_amount).value())
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn raw(plate: &str, date: &str, amount: &str, page: u32) -> RawRecord {
        RawRecord {
            plate: plate.to_string(),
            date: date.to_string(),
            amount: amount.to_string(),
            source_text: format!("{plate} {date} {amount}"),
            page,
            line_ref: "line_1".to_string(),
        }
    }

    #[test]
    fn test_same_key_sums() {
        let records = vec![
            raw("ABC-1234", "01/02/2024", "100,00", 1),
            raw("ABC-1234", "01/02/2024", "50,00", 2),
        ];

        let result = aggregate(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_amount, "150,00");
        assert_eq!(result[0].numeric_total, dec!(150.00));
        assert_eq!(result[0].record_count, 2);
        assert_eq!(result[0].pages, BTreeSet::from([1, 2]));
        assert_eq!(result[0].page(), 1);
        assert_eq!(
            result[0].source_text,
            "PLACA: ABC-1234 | DATA: 01/02/2024 | TOTAL: R$ 150,00 | REGISTROS: 2"
        );
    }

    #[test]
    fn test_distinct_dates_stay_separate() {
        let records = vec![
            raw("ABC-1234", "01/02/2024", "100,00", 1),
            raw("ABC-1234", "02/02/2024", "50,00", 1),
        ];

        let result = aggregate(&records);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].record_count, 1);
        assert_eq!(result[1].record_count, 1);
        assert_eq!(
            result[0].source_text,
            "PLACA: ABC-1234 | DATA: 01/02/2024 | TOTAL: R$ 100,00"
        );
    }

    #[test]
    fn test_sorted_by_plate_then_date() {
        let records = vec![
            raw("XYZ-0001", "01/01/2024", "1,00", 1),
            raw("ABC-1234", "02/02/2024", "1,00", 1),
            raw("ABC-1234", "01/02/2024", "1,00", 1),
        ];

        let result = aggregate(&records);
        let keys: Vec<(&str, &str)> = result
            .iter()
            .map(|r| (r.plate.as_str(), r.date.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("ABC-1234", "01/02/2024"),
                ("ABC-1234", "02/02/2024"),
                ("XYZ-0001", "01/01/2024"),
            ]
        );
    }

    #[test]
    fn test_order_independent() {
        let mut records = vec![
            raw("ABC-1234", "01/02/2024", "100,00", 1),
            raw("XYZ-0001", "01/02/2024", "7,50", 2),
            raw("ABC-1234", "01/02/2024", "50,00", 3),
        ];

        let forward = aggregate(&records);
        records.reverse();
        let backward = aggregate(&records);

        assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(&backward) {
            assert_eq!(a.plate, b.plate);
            assert_eq!(a.date, b.date);
            assert_eq!(a.numeric_total, b.numeric_total);
            assert_eq!(a.record_count, b.record_count);
        }
    }

    #[test]
    fn test_empty_plate_dropped() {
        let records = vec![
            raw("", "01/02/2024", "100,00", 1),
            raw("ABC-1234", "01/02/2024", "50,00", 1),
        ];

        let result = aggregate(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].plate, "ABC-1234");
    }

    #[test]
    fn test_unparsable_amount_counts_as_zero() {
        let records = vec![
            raw("ABC-1234", "01/02/2024", "100,00", 1),
            raw("ABC-1234", "01/02/2024", "???", 1),
        ];

        let result = aggregate(&records);
        assert_eq!(result[0].numeric_total, dec!(100.00));
        assert_eq!(result[0].record_count, 2);
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            raw("ABC-1234", "01/02/2024", "1.234,56", 1),
            raw("ABC-1234", "", "765,44", 1),
            raw("XYZ-0001", "01/02/2024", "0,00", 1),
        ];

        let summary = summarize(&aggregate(&records));
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.distinct_plates, 2);
        assert_eq!(summary.with_date, 2);
        assert_eq!(summary.with_amount, 3);
        assert_eq!(summary.grand_total, dec!(2000.00));
    }
}
