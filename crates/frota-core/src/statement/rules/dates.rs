//! Date recognition and canonicalization.

use chrono::{Datelike, Utc};

use super::patterns::DATE_PATTERN;

/// Find the first date-shaped substring in a line.
pub fn find_date(text: &str) -> Option<&str> {
    DATE_PATTERN.find(text).map(|m| m.as_str())
}

/// Canonicalize a raw date match to `DD/MM/YYYY`.
///
/// Separators `-` and `.` are normalized to `/`, day and month are
/// zero-padded and a 2-digit year is expanded with the current year's last
/// two digits as the pivot. Inputs that do not split into three parts are
/// returned with only the separator cleanup applied.
pub fn clean_date(raw: &str) -> String {
    clean_date_with_pivot(raw, Utc::now().year() % 100)
}

fn clean_date_with_pivot(raw: &str, pivot: i32) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '/' | '-' | '.'))
        .map(|c| if c == '-' || c == '.' { '/' } else { c })
        .collect();

    let parts: Vec<&str> = cleaned.split('/').collect();
    if parts.len() != 3 {
        return cleaned;
    }

    let (day, month, year) = (parts[0], parts[1], parts[2]);
    let year = expand_year(year, pivot);

    format!("{:0>2}/{:0>2}/{}", day, month, year)
}

fn expand_year(year: &str, pivot: i32) -> String {
    if year.len() != 2 {
        return year.to_string();
    }
    match year.parse::<i32>() {
        Ok(yy) if yy <= pivot => format!("20{year}"),
        Ok(_) => format!("19{year}"),
        Err(_) => year.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_date() {
        assert_eq!(find_date("ABC-1234 01/02/2024 DIESEL"), Some("01/02/2024"));
        assert_eq!(find_date("saldo em 5-3-24"), Some("5-3-24"));
        assert_eq!(find_date("data 15.03.2024"), Some("15.03.2024"));
        assert_eq!(find_date("sem data aqui"), None);
    }

    #[test]
    fn test_clean_date_normalizes_separators() {
        assert_eq!(clean_date_with_pivot("15-03-2024", 26), "15/03/2024");
        assert_eq!(clean_date_with_pivot("15.03.2024", 26), "15/03/2024");
    }

    #[test]
    fn test_clean_date_zero_pads() {
        assert_eq!(clean_date_with_pivot("5/3/2024", 26), "05/03/2024");
    }

    #[test]
    fn test_clean_date_expands_two_digit_year() {
        // At or below the pivot lands in the 2000s, above it in the 1900s
        assert_eq!(clean_date_with_pivot("01/02/24", 26), "01/02/2024");
        assert_eq!(clean_date_with_pivot("01/02/99", 26), "01/02/1999");
    }

    #[test]
    fn test_clean_date_non_triple_passthrough() {
        assert_eq!(clean_date_with_pivot("15/03", 26), "15/03");
        assert_eq!(clean_date_with_pivot("2024", 26), "2024");
    }

    #[test]
    fn test_clean_date_current_pivot() {
        // "01" stays in the 2000s for any pivot year from 2001 on
        assert_eq!(clean_date("02/01/01"), "02/01/2001");
    }
}
