//! # Input Validation
//!
//! Pure checks over raw prompt input, run before anything touches storage.
//!
//! The date check is shape-only: four digits, hyphen, two digits, hyphen,
//! two digits. Month and day ranges and leap years are deliberately not
//! verified; `2023-02-30` passes. Numeric checks parse the whole token as
//! an f64, so trailing junk (`"1.5abc"`) is rejected along with negative
//! values.
//!
//! Referential existence lives on [`crate::Database::exists_as_key`]; the
//! field-kind chains in [`crate::catalog`] combine it with these checks so
//! that a foreign-key miss becomes an early, user-facing rejection instead
//! of a raw engine error.

/// Shape-only date check: `\d{4}-\d{2}-\d{2}`, nothing more.
pub fn is_valid_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Parses `s` as an f64 greater than or equal to zero.
pub fn parse_non_negative(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| *v >= 0.0)
}

/// Parses `s` as an f64 inside the closed interval `[lo, hi]`.
pub fn parse_in_range(s: &str, lo: f64, hi: f64) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| *v >= lo && *v <= hi)
}

/// True iff `s` parses as an f64 greater than or equal to zero.
pub fn is_non_negative_number(s: &str) -> bool {
    parse_non_negative(s).is_some()
}

/// True iff `s` parses as an f64 inside the closed interval `[lo, hi]`.
pub fn is_in_range(s: &str, lo: f64, hi: f64) -> bool {
    parse_in_range(s, lo, hi).is_some()
}
