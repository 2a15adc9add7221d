//! # Measurement Parser
//!
//! This module reads a free-text measurement string, as found on a recipe
//! ingredient, into a numeric quantity and a unit.
//!
//! ## Grammar
//!
//! The first matching form wins:
//!
//! - Fractions at the start of the text (`1/2 cup`, `3 / 4 tsp`)
//! - Decimal numbers at the start of the text (`2`, `2.5 tbsp`)
//!
//! Anything else (`a pinch`, `to taste`, blank text) is not parsable. Units are
//! kept as the literal lower-cased remainder of the text; `cup` and `cups` are
//! different units.
//!
//! ## Usage
//!
//! ```rust
//! use ingredients::measurement_parser::parse_measurement;
//!
//! let parsed = parse_measurement("1/2 cup").unwrap();
//! assert_eq!(parsed.quantity, 0.5);
//! assert_eq!(parsed.unit, "cup");
//!
//! assert!(parse_measurement("a pinch").is_none());
//! ```

use crate::measurement_patterns::{DECIMAL_REGEX, FRACTION_REGEX};
use crate::measurement_types::ParsedMeasurement;

/// Parse a measurement string into a quantity and a unit
///
/// Returns `None` when the text does not start with a fraction or a decimal
/// number. A fraction with a zero denominator is also reported as `None`.
pub fn parse_measurement(measure_text: &str) -> Option<ParsedMeasurement> {
    if measure_text.trim().is_empty() {
        return None;
    }

    let text = measure_text.to_lowercase();
    let text = text.trim();

    if let Some(captures) = FRACTION_REGEX.captures(text) {
        let numerator: f64 = captures[1].parse().ok()?;
        let denominator: f64 = captures[2].parse().ok()?;

        if denominator == 0.0 {
            return None;
        }

        let end = captures.get(0)?.end();
        return Some(ParsedMeasurement {
            quantity: numerator / denominator,
            unit: text[end..].trim().to_string(),
        });
    }

    if let Some(number) = DECIMAL_REGEX.find(text) {
        let quantity = parse_decimal(number.as_str())?;
        return Some(ParsedMeasurement {
            quantity,
            unit: text[number.end()..].trim().to_string(),
        });
    }

    None
}

/// Parse a matched decimal, accepting a dangling point ("2." reads as 2)
fn parse_decimal(number: &str) -> Option<f64> {
    number.trim_end_matches('.').parse().ok()
}
