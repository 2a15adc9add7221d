//! # Shopping List Service
//!
//! Fetches a user's scheduled recipes for a date range and aggregates their
//! ingredients into a shopping list.

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ShoppingListError;
use crate::meal_plan::{DateRange, MealPlanSource};
use crate::measurement_types::ShoppingListItem;
use crate::shopping_list::AggregationState;

/// Builds shopping lists from any [`MealPlanSource`]
pub struct ShoppingListService<S> {
    source: S,
}

impl<S: MealPlanSource> ShoppingListService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying meal plan source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the shopping list for every recipe `user_id` scheduled within `range`
    ///
    /// Ingredients are folded in entry order, then recipe order, so each
    /// item's `measures` reflect the order recipes appear in the plan.
    pub async fn shopping_list(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<ShoppingListItem>, ShoppingListError> {
        let entries = self.source.entries_in_range(user_id, range).await?;

        let mut state = AggregationState::new();
        for entry in &entries {
            if entry.recipe.ingredients.is_empty() {
                debug!(
                    "Meal plan entry {} ('{}') has no ingredients",
                    entry.id, entry.recipe.title
                );
                continue;
            }
            for line in &entry.recipe.ingredients {
                state.add_line(line);
            }
        }

        let items = state.into_items();
        info!(
            "Built shopping list for user {} from {} to {}: {} entries, {} items",
            user_id,
            range.start,
            range.end,
            entries.len(),
            items.len()
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::{InMemoryMealPlans, MealPlanEntry, SavedRecipe};
    use crate::measurement_types::IngredientLine;
    use chrono::NaiveDate;

    fn entry(id: i32, user_id: Uuid, day: u32, ingredients: Vec<IngredientLine>) -> MealPlanEntry {
        MealPlanEntry {
            id,
            user_id,
            plan_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            recipe: SavedRecipe {
                id,
                api_recipe_id: format!("5277{id}"),
                title: format!("Recipe {id}"),
                ingredients,
            },
        }
    }

    #[tokio::test]
    async fn test_empty_plan_gives_empty_list() {
        let service = ShoppingListService::new(InMemoryMealPlans::new());
        let range = DateRange::parse("2024-05-01", "2024-05-07").unwrap();
        let list = service.shopping_list(Uuid::new_v4(), &range).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_recipes_without_ingredients_contribute_nothing() {
        let user = Uuid::new_v4();
        let plans = InMemoryMealPlans::new()
            .with_entry(entry(1, user, 2, vec![]))
            .with_entry(entry(2, user, 3, vec![IngredientLine::new("Rice", "1 cup")]));
        let service = ShoppingListService::new(plans);
        let range = DateRange::parse("2024-05-01", "2024-05-07").unwrap();

        let list = service.shopping_list(user, &range).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].estimated_total, "1 cup");
    }
}
