//! Input contract with the external document-to-text converter.
//!
//! The pipeline never parses binary page layout itself. A converter hands it
//! an ordered sequence of [`Page`]s, each carrying zero or more tables and
//! the page's text as an ordered sequence of lines.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// One table row: cell values as produced by the converter, `None` where the
/// converter found no cell content.
pub type TableRow = Vec<Option<String>>;

/// One extracted table: a sequence of rows.
pub type Table = Vec<TableRow>;

/// One page of converter output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,

    /// Full-page text as ordered lines. May be empty for table-only pages.
    #[serde(default)]
    pub lines: Vec<String>,

    /// Tables detected on the page.
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Trait for document sources producing converter output.
pub trait PageSource {
    /// Produce the ordered pages of one document.
    fn pages(&self) -> std::result::Result<Vec<Page>, SourceError>;
}
