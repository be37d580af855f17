//! Data models for extracted billing records.

pub mod record;

pub use record::{AggregatedRecord, RawRecord};
