use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::drink::{sample_drink, Drink, NewDrink};
use crate::database::store::{prepare_columns, DrinkStore};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Drink>,
}

impl Table {
    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|d| d.title == title && Some(d.id) != except)
    }

    fn insert(&mut self, drink: NewDrink) -> Result<Drink, DatabaseError> {
        prepare_columns(&drink.title, &drink.recipe)?;
        if self.title_taken(&drink.title, None) {
            return Err(DatabaseError::Constraint(format!(
                "title '{}' already exists",
                drink.title
            )));
        }

        self.last_id += 1;
        let stored = Drink {
            id: self.last_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        self.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

/// Process-local drink store with the same constraints as the `drinks` table.
/// Ids keep increasing after deletes, like a `SERIAL` column.
#[derive(Default)]
pub struct MemoryDrinkStore {
    table: RwLock<Table>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, DatabaseError> {
        self.table.write().await.insert(drink)
    }

    async fn update(&self, drink: &Drink) -> Result<(), DatabaseError> {
        prepare_columns(&drink.title, &drink.recipe)?;

        let mut table = self.table.write().await;
        if table.title_taken(&drink.title, Some(drink.id)) {
            return Err(DatabaseError::Constraint(format!(
                "title '{}' already exists",
                drink.title
            )));
        }
        match table.rows.get_mut(&drink.id) {
            Some(row) => {
                *row = drink.clone();
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("drink {}", drink.id))),
        }
    }

    async fn delete(&self, drink: &Drink) -> Result<(), DatabaseError> {
        match self.table.write().await.rows.remove(&drink.id) {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(format!("drink {}", drink.id))),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn reset(&self) -> Result<(), DatabaseError> {
        let mut table = self.table.write().await;
        *table = Table::default();
        table.insert(sample_drink())?;
        Ok(())
    }
}
