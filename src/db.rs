use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ShoppingListError;
use crate::meal_plan::{ingredient_lines_from_json, DateRange, MealPlanEntry, MealPlanSource, SavedRecipe};
use crate::measurement_types::IngredientLine;

/// Connect to PostgreSQL with a bounded pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to database (max {} connections)", max_connections);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Create the saved-recipe and meal-plan tables the shopping list reads
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS saved_recipes (
            id SERIAL PRIMARY KEY,
            user_id UUID NOT NULL,
            api_recipe_id TEXT NOT NULL,
            title TEXT NOT NULL,
            image_url TEXT,
            instructions TEXT,
            ingredients JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create saved_recipes table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS meal_plan (
            id SERIAL PRIMARY KEY,
            user_id UUID NOT NULL,
            saved_recipe_id INTEGER NOT NULL REFERENCES saved_recipes(id) ON DELETE CASCADE,
            plan_date DATE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create meal_plan table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS meal_plan_user_date_idx ON meal_plan (user_id, plan_date)")
        .execute(pool)
        .await
        .context("Failed to create meal_plan index")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Store a saved recipe with its ingredients, returning the new recipe id
pub async fn save_recipe(
    pool: &PgPool,
    user_id: Uuid,
    api_recipe_id: &str,
    title: &str,
    ingredients: &[IngredientLine],
) -> Result<i32> {
    info!("Saving recipe '{}' for user {}", title, user_id);

    let records: Vec<Value> = ingredients
        .iter()
        .map(|line| {
            serde_json::json!({
                "ingredient": line.ingredient_name,
                "measure": line.measure_text,
            })
        })
        .collect();

    let recipe_id: i32 = sqlx::query_scalar(
        "INSERT INTO saved_recipes (user_id, api_recipe_id, title, ingredients)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(api_recipe_id)
    .bind(title)
    .bind(Value::Array(records))
    .fetch_one(pool)
    .await
    .context("Failed to insert saved recipe")?;

    info!("Recipe saved with ID: {}", recipe_id);
    Ok(recipe_id)
}

/// Schedule a saved recipe on a date, returning the new meal plan entry id
pub async fn schedule_recipe(
    pool: &PgPool,
    user_id: Uuid,
    saved_recipe_id: i32,
    plan_date: NaiveDate,
) -> Result<i32> {
    info!(
        "Scheduling recipe {} on {} for user {}",
        saved_recipe_id, plan_date, user_id
    );

    let entry_id: i32 = sqlx::query_scalar(
        "INSERT INTO meal_plan (user_id, saved_recipe_id, plan_date)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(saved_recipe_id)
    .bind(plan_date)
    .fetch_one(pool)
    .await
    .context("Failed to insert meal plan entry")?;

    info!("Meal plan entry created with ID: {}", entry_id);
    Ok(entry_id)
}

/// Read every meal plan entry of a user within an inclusive date range
pub async fn read_meal_plan_entries(
    pool: &PgPool,
    user_id: Uuid,
    range: &DateRange,
) -> Result<Vec<MealPlanEntry>> {
    debug!(
        "Reading meal plan entries for user {} between {} and {}",
        user_id, range.start, range.end
    );

    let rows = sqlx::query(
        "SELECT mp.id, mp.user_id, mp.plan_date,
                sr.id AS recipe_id, sr.api_recipe_id, sr.title, sr.ingredients
         FROM meal_plan mp
         JOIN saved_recipes sr ON sr.id = mp.saved_recipe_id
         WHERE mp.user_id = $1 AND mp.plan_date >= $2 AND mp.plan_date <= $3
         ORDER BY mp.plan_date, mp.id",
    )
    .bind(user_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_all(pool)
    .await
    .context("Failed to read meal plan entries")?;

    let entries = rows
        .iter()
        .map(entry_from_row)
        .collect::<Result<Vec<_>>>()?;

    info!("Found {} meal plan entries for user {}", entries.len(), user_id);
    Ok(entries)
}

fn entry_from_row(row: &PgRow) -> Result<MealPlanEntry> {
    let ingredients: Option<Value> = row
        .try_get("ingredients")
        .context("Failed to read recipe ingredients")?;

    Ok(MealPlanEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        plan_date: row.try_get("plan_date")?,
        recipe: SavedRecipe {
            id: row.try_get("recipe_id")?,
            api_recipe_id: row.try_get("api_recipe_id")?,
            title: row.try_get("title")?,
            ingredients: ingredients
                .as_ref()
                .map(ingredient_lines_from_json)
                .unwrap_or_default(),
        },
    })
}

/// Meal plan source backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgMealPlanStore {
    pool: PgPool,
}

impl PgMealPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MealPlanSource for PgMealPlanStore {
    async fn entries_in_range(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<MealPlanEntry>, ShoppingListError> {
        Ok(read_meal_plan_entries(&self.pool, user_id, range).await?)
    }
}
