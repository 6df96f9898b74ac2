use serde::{Deserialize, Serialize};
use serde_json::Number;
use sqlx::FromRow;

/// Width of the `drinks.title` column.
pub const TITLE_MAX_LEN: usize = 80;

/// One ingredient of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: Number,
}

/// Ingredient with the `name` removed, as exposed by the public listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientShort {
    pub color: String,
    pub parts: Number,
}

/// Recipe body accepted on input: a list of ingredients or a single one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

/// Ordered list of ingredients. Always serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecipeInput")]
pub struct Recipe(Vec<Ingredient>);

impl From<RecipeInput> for Recipe {
    fn from(input: RecipeInput) -> Self {
        match input {
            RecipeInput::Many(ingredients) => Recipe(ingredients),
            RecipeInput::One(ingredient) => Recipe(vec![ingredient]),
        }
    }
}

impl From<Vec<Ingredient>> for Recipe {
    fn from(ingredients: Vec<Ingredient>) -> Self {
        Recipe(ingredients)
    }
}

impl Recipe {
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text form written to the `recipe` column.
    pub fn to_column(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_column(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn short(&self) -> Vec<IngredientShort> {
        self.0
            .iter()
            .map(|i| IngredientShort {
                color: i.color.clone(),
                parts: i.parts.clone(),
            })
            .collect()
    }
}

/// A stored drink. Serializes as the long representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Recipe,
}

/// Public projection of a drink: ingredient names are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.short(),
        }
    }

    pub fn long(&self) -> Drink {
        self.clone()
    }
}

/// Fields required to insert a drink.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Recipe,
}

/// Raw `drinks` row, with the recipe still in its serialized form.
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i32,
    pub title: String,
    pub recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe: Recipe::from_column(&row.recipe)?,
        })
    }
}

/// Drink inserted by `reset`.
pub fn sample_drink() -> NewDrink {
    NewDrink {
        title: "water".to_string(),
        recipe: Recipe(vec![Ingredient {
            name: "water".to_string(),
            color: "blue".to_string(),
            parts: Number::from(1),
        }]),
    }
}
