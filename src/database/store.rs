use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::drink::{Drink, NewDrink, Recipe, TITLE_MAX_LEN};

/// Storage operations for drinks. Every write touches a single row.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks in insertion order
    async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, DatabaseError>;

    /// Insert a drink and return it with its generated id
    async fn insert(&self, drink: NewDrink) -> Result<Drink, DatabaseError>;

    /// Persist changes to a previously fetched drink
    async fn update(&self, drink: &Drink) -> Result<(), DatabaseError>;

    async fn delete(&self, drink: &Drink) -> Result<(), DatabaseError>;

    /// Connectivity probe used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Drop everything, recreate the schema and seed the sample drink.
    /// Destroys all stored drinks.
    async fn reset(&self) -> Result<(), DatabaseError>;
}

/// Validate a row before writing it and return the serialized recipe column
pub(crate) fn prepare_columns(title: &str, recipe: &Recipe) -> Result<String, DatabaseError> {
    if title.trim().is_empty() {
        return Err(DatabaseError::Constraint("title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DatabaseError::Constraint(format!(
            "title exceeds {} characters",
            TITLE_MAX_LEN
        )));
    }
    if recipe.is_empty() {
        return Err(DatabaseError::Constraint("recipe must not be empty".to_string()));
    }

    Ok(recipe.to_column()?)
}
