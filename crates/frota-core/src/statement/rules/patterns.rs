//! Regex patterns for billing statement field recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Vehicle plates: legacy LLL9999 and Mercosul LLL9L99, optional separator
    pub static ref PLATE_PATTERN: Regex = Regex::new(
        r"(?i)\b[A-Z]{3}[-\s]?\d{4}\b|\b[A-Z]{3}[-\s]?\d[A-Z]\d{2}\b"
    ).unwrap();

    // Dates: D/M/Y with /, - or . separators, 2- or 4-digit year
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"\b\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b"
    ).unwrap();

    // Monetary value, single-match recognizer: optional currency marker,
    // optional thousands grouping
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"R?\$?\s*\d{1,3}(?:[.,]\d{3})*[.,]\d{2}"
    ).unwrap();

    // Monetary values, find-all form (ungrouped)
    pub static ref AMOUNT_ALL: Regex = Regex::new(
        r"\d+[.,]\d{2}"
    ).unwrap();

    // Salvage ladder for corrupted amounts, in priority order
    pub static ref BR_GROUPED: Regex = Regex::new(
        r"\d{1,3}(?:\.\d{3})*,\d{2}"
    ).unwrap();

    pub static ref US_GROUPED: Regex = Regex::new(
        r"\d{1,3}(?:,\d{3})*\.\d{2}"
    ).unwrap();

    pub static ref COMMA_DECIMAL: Regex = Regex::new(
        r"\d+,\d{2}"
    ).unwrap();

    pub static ref DOT_DECIMAL: Regex = Regex::new(
        r"\d+\.\d{2}"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"\d+"
    ).unwrap();
}

/// Header phrases marking lines that carry no record data.
pub const HEADER_MARKERS: [&str; 2] = ["PLACA DATA PRODUTO", "MOTORISTA FROTA"];

/// Prefix of statement total lines; seeing one resets the plate context.
pub const TOTAL_MARKER: &str = "TOTAL R$";
