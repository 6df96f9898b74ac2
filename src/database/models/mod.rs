pub mod drink;

pub use drink::{Drink, DrinkShort, Ingredient, IngredientShort, NewDrink, Recipe};
