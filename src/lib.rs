//! # Ingredients Shopping List
//!
//! Turns the recipes a user scheduled over a date range into one consolidated
//! shopping list: free-text measurements are parsed, summed per unit and
//! rendered per ingredient.

pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod meal_plan;
pub mod measurement_parser;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod service;
pub mod shopping_list;
