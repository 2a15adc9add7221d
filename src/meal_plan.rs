//! # Meal Plan Module
//!
//! This module defines the scheduled-recipe records a shopping list is built
//! from, the inclusive date range used to select them, and the
//! [`MealPlanSource`] trait through which they are fetched.
//!
//! Saved recipes keep their ingredients as a JSON array of
//! `{ "ingredient": ..., "measure": ... }` objects. [`ingredient_lines_from_json`]
//! validates that array into [`IngredientLine`] values, dropping records that
//! have no usable ingredient name.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ShoppingListError;
use crate::measurement_types::IngredientLine;

/// ISO calendar date format accepted for range bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting one whose start falls after its end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ShoppingListError> {
        if start > end {
            return Err(ShoppingListError::InvalidDateRange(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, ShoppingListError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Whether `date` falls within the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, ShoppingListError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| ShoppingListError::InvalidDate(format!("'{text}': {e}")))
}

/// A recipe saved by a user from the external catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: i32,
    /// Identifier of the recipe in the external catalog
    pub api_recipe_id: String,
    pub title: String,
    /// Validated ingredient lines, in recipe order
    pub ingredients: Vec<IngredientLine>,
}

/// A saved recipe scheduled on a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: i32,
    pub user_id: Uuid,
    pub plan_date: NaiveDate,
    pub recipe: SavedRecipe,
}

/// Source of scheduled recipes for a user
///
/// Implementations return every entry of `user_id` whose plan date lies
/// within `range` (bounds included), in a stable order.
#[async_trait]
pub trait MealPlanSource: Send + Sync {
    async fn entries_in_range(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<MealPlanEntry>, ShoppingListError>;
}

/// In-memory meal plan, ordered by plan date then entry id
#[derive(Debug, Clone, Default)]
pub struct InMemoryMealPlans {
    entries: Vec<MealPlanEntry>,
}

impl InMemoryMealPlans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the plan
    pub fn add_entry(&mut self, entry: MealPlanEntry) {
        self.entries.push(entry);
    }

    /// Builder-style variant of [`add_entry`](Self::add_entry)
    pub fn with_entry(mut self, entry: MealPlanEntry) -> Self {
        self.add_entry(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MealPlanSource for InMemoryMealPlans {
    async fn entries_in_range(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<MealPlanEntry>, ShoppingListError> {
        let mut entries: Vec<MealPlanEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.user_id == user_id && range.contains(entry.plan_date))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.plan_date, entry.id));

        debug!(
            "Found {} in-memory meal plan entries for user {} between {} and {}",
            entries.len(),
            user_id,
            range.start,
            range.end
        );
        Ok(entries)
    }
}

/// Validate one stored ingredient record
///
/// The record must be an object with a string `ingredient`. A missing or null
/// `measure` reads as a blank measure; any other non-string measure is rejected.
pub fn ingredient_line_from_record(record: &Value) -> Result<IngredientLine, ShoppingListError> {
    let object = record
        .as_object()
        .ok_or_else(|| ShoppingListError::InvalidRecord(format!("expected an object, got {record}")))?;

    let ingredient_name = match object.get("ingredient") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(ShoppingListError::InvalidRecord(format!(
                "ingredient must be a string, got {other}"
            )))
        }
        None => {
            return Err(ShoppingListError::InvalidRecord(
                "missing ingredient name".to_string(),
            ))
        }
    };

    let measure_text = match object.get("measure") {
        Some(Value::String(measure)) => measure.as_str(),
        Some(Value::Null) | None => "",
        Some(other) => {
            return Err(ShoppingListError::InvalidRecord(format!(
                "measure must be a string, got {other}"
            )))
        }
    };

    Ok(IngredientLine::new(ingredient_name, measure_text))
}

/// Validate a stored ingredient array, skipping records that fail validation
///
/// A null or non-array value holds no ingredients.
pub fn ingredient_lines_from_json(value: &Value) -> Vec<IngredientLine> {
    let Some(records) = value.as_array() else {
        if !value.is_null() {
            warn!("Ignoring ingredient data that is not an array: {}", value);
        }
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match ingredient_line_from_record(record) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!("Skipping ingredient record: {}", e);
                None
            }
        })
        .collect()
}
