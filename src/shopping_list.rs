//! # Shopping List Aggregation
//!
//! This module merges the ingredient lines of every scheduled recipe into a
//! deduplicated shopping list.
//!
//! ## Rules
//!
//! - Ingredient names are grouped by their trimmed, title-cased form
//! - Lines with a blank measurement contribute nothing
//! - Parsed quantities are summed per unit, where units must match exactly
//! - Measurements that cannot be parsed are kept verbatim
//! - The list is sorted by ingredient name, and the parts of each total are
//!   sorted lexicographically and joined with `" & "`
//!
//! ## Usage
//!
//! ```rust
//! use ingredients::measurement_types::IngredientLine;
//! use ingredients::shopping_list::aggregate;
//!
//! let lines = vec![
//!     IngredientLine::new("Salt", "1 tsp"),
//!     IngredientLine::new("salt", "a pinch"),
//! ];
//! let list = aggregate(&lines);
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(list[0].ingredient, "Salt");
//! assert_eq!(list[0].estimated_total, "1 tsp & a pinch");
//! ```

use std::collections::BTreeMap;

use crate::measurement_parser::parse_measurement;
use crate::measurement_types::{IngredientLine, ShoppingListItem};

/// Separator between the parts of an estimated total
pub const TOTAL_SEPARATOR: &str = " & ";

/// Significant digits kept when rendering a summed quantity
const SIGNIFICANT_DIGITS: usize = 6;

/// Accumulated measurements for one normalized ingredient name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientTotals {
    /// Summed quantity per unit; the empty unit holds plain counts
    pub unit_totals: BTreeMap<String, f64>,
    /// Measures that could not be parsed, in encounter order
    pub unparsed_measures: Vec<String>,
    /// Every non-blank measure seen, in encounter order
    pub original_measures: Vec<String>,
}

impl IngredientTotals {
    /// Record one non-blank measure
    fn record(&mut self, measure_text: &str) {
        self.original_measures.push(measure_text.to_string());

        match parse_measurement(measure_text) {
            Some(parsed) => {
                *self.unit_totals.entry(parsed.unit).or_insert(0.0) += parsed.quantity;
            }
            None => self.unparsed_measures.push(measure_text.to_string()),
        }
    }

    /// Render the estimated total, e.g. "1.5 cup & 2 cups & a handful"
    pub fn estimated_total(&self) -> String {
        let mut parts: Vec<String> = self
            .unit_totals
            .iter()
            .map(|(unit, total)| format!("{} {}", format_quantity(*total), unit).trim().to_string())
            .collect();
        parts.extend(self.unparsed_measures.iter().cloned());
        parts.sort();
        parts.join(TOTAL_SEPARATOR)
    }
}

/// Per-request aggregation state, keyed by normalized ingredient name
#[derive(Debug, Clone, Default)]
pub struct AggregationState {
    ingredients: BTreeMap<String, IngredientTotals>,
}

impl AggregationState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one ingredient line into the state
    pub fn add_line(&mut self, line: &IngredientLine) {
        if line.has_blank_measure() {
            return;
        }

        let key = normalize_ingredient_name(&line.ingredient_name);
        self.ingredients
            .entry(key)
            .or_default()
            .record(&line.measure_text);
    }

    /// Accumulated totals for a normalized ingredient name
    pub fn totals(&self, ingredient: &str) -> Option<&IngredientTotals> {
        self.ingredients.get(ingredient)
    }

    /// Number of distinct ingredients recorded so far
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Render the shopping list, sorted by ingredient name
    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.ingredients
            .into_iter()
            .filter_map(|(ingredient, totals)| {
                let estimated_total = totals.estimated_total();
                if estimated_total.is_empty() {
                    return None;
                }
                Some(ShoppingListItem {
                    ingredient,
                    estimated_total,
                    measures: totals.original_measures,
                })
            })
            .collect()
    }
}

/// Aggregate ingredient lines into a shopping list
pub fn aggregate<'a, I>(lines: I) -> Vec<ShoppingListItem>
where
    I: IntoIterator<Item = &'a IngredientLine>,
{
    let mut state = AggregationState::new();
    for line in lines {
        state.add_line(line);
    }
    state.into_items()
}

/// Normalize an ingredient name into its grouping key: trimmed and title-cased
///
/// Every run of letters is a word; its first letter is upper-cased and the rest
/// lower-cased. Any other character ends the word, so "o'neil" becomes "O'Neil".
pub fn normalize_ingredient_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_word = false;

    for c in name.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            normalized.push(c);
            in_word = false;
        }
    }

    normalized
}

/// Render a quantity in general notation with six significant digits
///
/// Integral values drop their fractional part ("3", not "3.0"), trailing zeros
/// are removed ("1.5"), and very large or very small magnitudes switch to
/// exponent notation ("1.23457e+06", "1e-05").
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = SIGNIFICANT_DIGITS - 1;
    let scientific = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
