//! # Measurement Types Module
//!
//! This module defines the core types flowing through shopping-list
//! aggregation: the raw ingredient lines fed in, the parsed measurement
//! produced for each of them, and the rendered list items handed back.

use serde::{Deserialize, Serialize};

/// One ingredient of one scheduled recipe, as supplied by the data-access layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Free-text ingredient name (e.g., "Tomato", " olive oil ")
    pub ingredient_name: String,
    /// Free-text measurement (e.g., "1/2 cup", "2", "a pinch"), possibly blank
    pub measure_text: String,
}

impl IngredientLine {
    /// Create a new ingredient line
    pub fn new(ingredient_name: &str, measure_text: &str) -> Self {
        Self {
            ingredient_name: ingredient_name.to_string(),
            measure_text: measure_text.to_string(),
        }
    }

    /// Whether the measurement is empty or whitespace only
    pub fn has_blank_measure(&self) -> bool {
        self.measure_text.trim().is_empty()
    }
}

/// A measurement string read as a numeric quantity and a unit
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMeasurement {
    /// The numeric quantity (e.g., 0.5 for "1/2 cup")
    pub quantity: f64,
    /// The lower-cased unit text following the quantity; empty for plain counts
    pub unit: String,
}

/// One line of the rendered shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Normalized (trimmed, title-cased) ingredient name
    pub ingredient: String,
    /// Summed quantities per unit and unparsable measures, joined by " & "
    pub estimated_total: String,
    /// Every non-blank original measure for the ingredient, in encounter order
    pub measures: Vec<String>,
}
