use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::drink::{sample_drink, Drink, DrinkRow, NewDrink};
use crate::database::store::{prepare_columns, DrinkStore};

const CREATE_DRINKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id SERIAL PRIMARY KEY,
        title VARCHAR(80) NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

/// Drink store backed by the Postgres `drinks` table
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `drinks` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_DRINKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError> {
        let rows: Vec<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| Drink::try_from(row).map_err(DatabaseError::from))
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, DatabaseError> {
        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Drink::try_from).transpose()?)
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, DatabaseError> {
        let recipe_text = prepare_columns(&drink.title, &drink.recipe)?;

        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id")
                .bind(&drink.title)
                .bind(&recipe_text)
                .fetch_one(&self.pool)
                .await?;

        debug!(drink_id = id, "Inserted drink");
        Ok(Drink {
            id,
            title: drink.title,
            recipe: drink.recipe,
        })
    }

    async fn update(&self, drink: &Drink) -> Result<(), DatabaseError> {
        let recipe_text = prepare_columns(&drink.title, &drink.recipe)?;

        let result = sqlx::query("UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1")
            .bind(drink.id)
            .bind(&drink.title)
            .bind(&recipe_text)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("drink {}", drink.id)));
        }
        Ok(())
    }

    async fn delete(&self, drink: &Drink) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(drink.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("drink {}", drink.id)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), DatabaseError> {
        let seed = sample_drink();
        let recipe_text = prepare_columns(&seed.title, &seed.recipe)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS drinks").execute(&mut *tx).await?;
        sqlx::query(CREATE_DRINKS_TABLE).execute(&mut *tx).await?;
        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id")
                .bind(&seed.title)
                .bind(&recipe_text)
                .fetch_one(&mut *tx)
                .await?;
        tx.commit().await?;

        info!(drink_id = id, "Reset drinks table");
        Ok(())
    }
}
