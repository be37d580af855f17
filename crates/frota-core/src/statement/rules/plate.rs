//! Vehicle plate ("placa") recognition and canonicalization.

use super::patterns::PLATE_PATTERN;

/// Find the first plate-shaped substring in a line.
pub fn find_plate(text: &str) -> Option<&str> {
    PLATE_PATTERN.find(text).map(|m| m.as_str())
}

/// Canonicalize a raw plate match.
///
/// Uppercases, strips everything outside `[A-Z0-9]` and inserts the hyphen
/// for 7-character legacy (`ABC1234` -> `ABC-1234`) and Mercosul
/// (`ABC1D23` -> `ABC-1D23`) forms. Anything else is returned stripped but
/// unhyphenated. Idempotent.
pub fn clean_plate(raw: &str) -> String {
    let plate: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if plate.len() == 7 {
        let b = plate.as_bytes();
        let letters = b[..3].iter().all(|c| c.is_ascii_alphabetic());
        let legacy = letters && b[3..].iter().all(|c| c.is_ascii_digit());
        let mercosul = letters
            && b[3].is_ascii_digit()
            && b[4].is_ascii_alphabetic()
            && b[5..].iter().all(|c| c.is_ascii_digit());

        if legacy || mercosul {
            return format!("{}-{}", &plate[..3], &plate[3..]);
        }
    }

    plate
}
