// handlers/mod.rs - Drink endpoints, split by access tier
//
// Public (no auth): GET /drinks
// Protected (bearer token + permission): /drinks-detail, POST/PATCH/DELETE /drinks
pub mod protected;
pub mod public;

use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::database::models::{Drink, NewDrink, Recipe};
use crate::error::ApiError;

/// `{"drinks": [...]}` body shared by the list, detail, create and update endpoints
#[derive(Debug, Serialize)]
pub struct DrinksBody<T: Serialize> {
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub delete: i32,
}

/// Request body of POST and PATCH. Empty strings and empty recipes count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkPayload {
    pub title: Option<String>,
    pub recipe: Option<Recipe>,
}

impl DrinkPayload {
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref().filter(|r| !r.is_empty())
    }

    /// Both title and recipe are required to create a drink
    pub fn into_new_drink(self) -> Result<NewDrink, ApiError> {
        match (self.title(), self.recipe()) {
            (Some(title), Some(recipe)) => Ok(NewDrink {
                title: title.to_string(),
                recipe: recipe.clone(),
            }),
            _ => {
                tracing::debug!("Rejected drink without title or recipe");
                Err(ApiError::BadRequest)
            }
        }
    }

    /// Overwrite the fields present in the payload
    pub fn apply_to(&self, drink: &mut Drink) {
        if let Some(title) = self.title() {
            drink.title = title.to_string();
        }
        if let Some(recipe) = self.recipe() {
            drink.recipe = recipe.clone();
        }
    }
}

/// Malformed or missing JSON bodies are a 400
pub fn reject_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ApiError::BadRequest
}

/// Drink ids in paths are integers; anything else cannot name a drink
pub fn parse_drink_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::NotFound)
}
