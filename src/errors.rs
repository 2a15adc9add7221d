//! # Error Types Module
//!
//! This module defines the errors a shopping-list request can surface to its
//! caller. Unparsable measurements are not errors and never appear here.

/// Custom error types for shopping-list requests
#[derive(Debug, Clone, PartialEq)]
pub enum ShoppingListError {
    /// Date range whose start falls after its end
    InvalidDateRange(String),
    /// Date text that is not a valid ISO calendar date
    InvalidDate(String),
    /// Ingredient record missing a required field
    InvalidRecord(String),
    /// Data-access failures
    Storage(String),
}

impl std::fmt::Display for ShoppingListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShoppingListError::InvalidDateRange(msg) => write!(f, "Invalid date range: {msg}"),
            ShoppingListError::InvalidDate(msg) => write!(f, "Invalid date: {msg}"),
            ShoppingListError::InvalidRecord(msg) => write!(f, "Invalid ingredient record: {msg}"),
            ShoppingListError::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for ShoppingListError {}

impl From<sqlx::Error> for ShoppingListError {
    fn from(err: sqlx::Error) -> Self {
        ShoppingListError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for ShoppingListError {
    fn from(err: anyhow::Error) -> Self {
        ShoppingListError::Storage(format!("{err:#}"))
    }
}
