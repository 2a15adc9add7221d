use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use uuid::Uuid;

use ingredients::config::AppConfig;
use ingredients::db::{self, PgMealPlanStore};
use ingredients::logging::init_logging;
use ingredients::meal_plan::DateRange;
use ingredients::service::ShoppingListService;

/// Print the shopping list for the recipes a user scheduled over a date range
#[derive(Parser, Debug)]
#[command(name = "shopping-list")]
#[command(about = "Build a consolidated shopping list from a meal plan", long_about = None)]
struct Cli {
    /// User identity (UUID)
    #[arg(long)]
    user: Uuid,

    /// First day of the range (YYYY-MM-DD), included
    #[arg(long)]
    start: String,

    /// Last day of the range (YYYY-MM-DD), included
    #[arg(long)]
    end: String,

    /// Create the meal plan tables before querying
    #[arg(long)]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file, then configuration
    let config = AppConfig::from_env()?;
    init_logging(&config)?;

    info!("Starting shopping list generation");

    let range = DateRange::parse(&cli.start, &cli.end)?;

    let pool = db::connect(config.require_database_url()?, config.max_connections).await?;
    if cli.init_schema {
        db::init_database_schema(&pool).await?;
    }

    let service = ShoppingListService::new(PgMealPlanStore::new(pool));
    let items = service.shopping_list(cli.user, &range).await?;

    let body = serde_json::to_string_pretty(&items).context("Failed to serialize shopping list")?;
    println!("{body}");

    Ok(())
}
