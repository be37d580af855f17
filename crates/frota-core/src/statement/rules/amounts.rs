//! Monetary value recognition and the numeric normalizer.
//!
//! Billing statements mix Brazilian grouped amounts (`1.234,56`), bare
//! comma or dot decimals, currency markers and the occasional corrupted
//! concatenation produced by the upstream converter. The normalizer never
//! fails: anything unrecoverable resolves to zero with a logged warning.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use super::patterns::{
    AMOUNT_ALL, AMOUNT_PATTERN, BR_GROUPED, COMMA_DECIMAL, DIGIT_RUN, DOT_DECIMAL, US_GROUPED,
};

/// Outcome of normalizing one amount string.
///
/// `Unparsed` keeps the original input so callers can tell a fallback zero
/// from a true zero; [`ParsedAmount::value`] merges both for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAmount {
    /// Confidently interpreted value.
    Parsed(Decimal),
    /// Unrecoverable input, resolved to zero.
    Unparsed(String),
}

impl ParsedAmount {
    /// The numeric value, with fallback inputs counting as zero.
    pub fn value(&self) -> Decimal {
        match self {
            ParsedAmount::Parsed(v) => *v,
            ParsedAmount::Unparsed(_) => Decimal::ZERO,
        }
    }

    /// True when the input could not be interpreted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedAmount::Unparsed(_))
    }
}

/// Find the first monetary substring in a line.
pub fn find_amount(text: &str) -> Option<&str> {
    AMOUNT_PATTERN.find(text).map(|m| m.as_str())
}

/// Find every ungrouped monetary substring, left to right.
///
/// Lines often carry a trailing quantity column shaped exactly like an
/// amount, so callers need the full list to pick the right token.
pub fn find_amounts(text: &str) -> Vec<&str> {
    AMOUNT_ALL.find_iter(text).map(|m| m.as_str()).collect()
}

/// Canonicalize a raw amount match to the decimal-comma display form.
///
/// `R$ 1.234,56` -> `1234,56`, `100.00` -> `100,00`, `100,00` unchanged.
pub fn clean_amount(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != 'R' && *c != '$' && !c.is_whitespace())
        .collect();

    let has_comma = cleaned.contains(',');
    let has_dot = cleaned.contains('.');

    if has_comma && has_dot {
        // thousands dots, decimal comma
        cleaned.replace('.', "")
    } else if has_dot {
        let parts: Vec<&str> = cleaned.split('.').collect();
        if parts.len() == 2 && parts[1].len() == 2 {
            cleaned.replace('.', ",")
        } else {
            cleaned
        }
    } else {
        cleaned
    }
}

/// Normalize a noisy amount string to an exact decimal.
///
/// Empty input is a true zero. Strings with more than one `.` or more than
/// one `,` are treated as corrupted converter output and go through the
/// salvage ladder instead of naive parsing.
pub fn parse_amount(raw: &str) -> ParsedAmount {
    if raw.trim().is_empty() {
        return ParsedAmount::Parsed(Decimal::ZERO);
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != 'R' && *c != '$' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return ParsedAmount::Parsed(Decimal::ZERO);
    }

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();
    if dots > 1 || commas > 1 {
        return salvage(raw, &cleaned);
    }

    let normalized = if dots == 1 && commas == 1 {
        // Brazilian grouped form: dot groups, comma decimal
        cleaned.replace('.', "").replace(',', ".")
    } else if commas == 1 {
        let parts: Vec<&str> = cleaned.split(',').collect();
        if parts.len() == 2 && parts[1].len() == 2 {
            cleaned.replace(',', ".")
        } else {
            // comma as thousands separator
            cleaned.replace(',', "")
        }
    } else {
        cleaned.clone()
    };

    match Decimal::from_str(&normalized) {
        Ok(value) => ParsedAmount::Parsed(value),
        Err(_) => salvage(raw, &cleaned),
    }
}

/// Extract a best-guess value from a corrupted amount string.
fn salvage(raw: &str, cleaned: &str) -> ParsedAmount {
    let digits: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if let Some(m) = BR_GROUPED.find(&digits) {
        let candidate = m.as_str().replace('.', "").replace(',', ".");
        if let Ok(value) = Decimal::from_str(&candidate) {
            warn!("amount {:?} looks corrupted, salvaged {}", raw, value);
            return ParsedAmount::Parsed(value);
        }
    }

    if let Some(m) = US_GROUPED.find(&digits) {
        let candidate = m.as_str().replace(',', "");
        if let Ok(value) = Decimal::from_str(&candidate) {
            warn!("amount {:?} looks corrupted, salvaged {}", raw, value);
            return ParsedAmount::Parsed(value);
        }
    }

    if let Some(m) = COMMA_DECIMAL.find(&digits) {
        if let Ok(value) = Decimal::from_str(&m.as_str().replace(',', ".")) {
            warn!("amount {:?} looks corrupted, salvaged {}", raw, value);
            return ParsedAmount::Parsed(value);
        }
    }

    if let Some(m) = DOT_DECIMAL.find(&digits) {
        if let Ok(value) = Decimal::from_str(m.as_str()) {
            warn!("amount {:?} looks corrupted, salvaged {}", raw, value);
            return ParsedAmount::Parsed(value);
        }
    }

    // Last resort: first digit run, last two digits taken as cents
    if let Some(m) = DIGIT_RUN.find(&digits) {
        let run = m.as_str();
        let candidate = if run.len() > 2 {
            format!("{}.{}", &run[..run.len() - 2], &run[run.len() - 2..])
        } else {
            run.to_string()
        };
        if let Ok(value) = Decimal::from_str(&candidate) {
            warn!("amount {:?} looks corrupted, salvaged {}", raw, value);
            return ParsedAmount::Parsed(value);
        }
    }

    warn!("could not interpret amount {:?}, falling back to zero", raw);
    ParsedAmount::Unparsed(raw.to_string())
}

/// Render an amount in the Brazilian display form: comma decimal, dot
/// thousands grouping, always two fractional digits. Zero is `0,00`.
pub fn format_amount(amount: Decimal) -> String {
    if amount.is_zero() {
        return "0,00".to_string();
    }

    let rounded = amount.round_dp(2).to_string();
    let (sign, rest) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, format!("{:0<2}", f)),
        None => (rest, "00".to_string()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped},{frac_part}")
}
