//! Rule-based field recognizers and cleaners for billing statements.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod plate;

pub use amounts::{
    clean_amount, find_amount, find_amounts, format_amount, parse_amount, ParsedAmount,
};
pub use dates::{clean_date, find_date};
pub use plate::{clean_plate, find_plate};
