//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to read the leading quantity
//! of a measurement string. Both patterns are anchored at the start of the text.

use lazy_static::lazy_static;
use regex::Regex;

// Leading fraction with optional spaces around the slash: "1/2", "3 / 4"
pub const FRACTION_PATTERN: &str = r"^([0-9]+)\s*/\s*([0-9]+)";

// Leading decimal number: "2", "2.5", "2."
pub const DECIMAL_PATTERN: &str = r"^([0-9]+\.?[0-9]*)";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref FRACTION_REGEX: Regex =
        Regex::new(FRACTION_PATTERN).expect("Fraction pattern should be valid");
    pub static ref DECIMAL_REGEX: Regex =
        Regex::new(DECIMAL_PATTERN).expect("Decimal pattern should be valid");
}
