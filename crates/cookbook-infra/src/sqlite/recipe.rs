//! SQLite recipe repository implementation.
//!
//! Implements `RecipeRepository` from `cookbook-core` over two tables: one row
//! per recipe in `recipes`, one row per ingredient in `ingredients` keyed by
//! `recipe_id`. Every write runs in a single transaction on the writer pool, so
//! a recipe and its ingredient rows are committed or discarded together.
//!
//! Listing order is `recipes.id ASC`; ingredient order is `ingredients.id ASC`.
//! A row that cannot be decoded is left out of the listing and logged; lookups
//! by identity still report it as `RepositoryError::Decode`.

use std::collections::HashMap;

use cookbook_core::repository::recipe::RecipeRepository;
use cookbook_types::error::RepositoryError;
use cookbook_types::recipe::{FoodCategory, Recipe, RecipeId};
use sqlx::{Row, SqliteConnection};

use super::pool::DatabasePool;

const SELECT_RECIPE: &str = "SELECT id, name, category, instructions, image FROM recipes";

/// SQLite-backed implementation of `RecipeRepository`.
pub struct SqliteRecipeRepository {
    pool: DatabasePool,
    max_ingredients: usize,
}

impl SqliteRecipeRepository {
    /// Create a new repository backed by the given database pool.
    ///
    /// Recipes read back from the database are bounded by `max_ingredients`.
    pub fn new(pool: DatabasePool, max_ingredients: usize) -> Self {
        Self {
            pool,
            max_ingredients,
        }
    }
}

/// Internal row type for mapping SQLite rows to domain Recipe.
struct RecipeRow {
    id: i64,
    name: String,
    category: String,
    instructions: String,
    image: Option<Vec<u8>>,
}

impl RecipeRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            instructions: row.try_get("instructions")?,
            image: row.try_get("image")?,
        })
    }

    fn into_recipe(
        self,
        ingredients: Vec<String>,
        max_ingredients: usize,
    ) -> Result<Recipe, RepositoryError> {
        let category = FoodCategory::from_name(&self.category).ok_or_else(|| {
            RepositoryError::Decode(format!(
                "recipe {} has unknown food category '{}'",
                self.id, self.category
            ))
        })?;

        if ingredients.len() > max_ingredients {
            return Err(RepositoryError::Decode(format!(
                "recipe {} has {} ingredients, limit is {max_ingredients}",
                self.id,
                ingredients.len()
            )));
        }

        let mut recipe = Recipe::new(max_ingredients);
        recipe.set_id(RecipeId(self.id));
        recipe
            .set_name(&self.name)
            .map_err(|e| RepositoryError::Decode(format!("recipe {}: {e}", self.id)))?;
        recipe.set_category(category);
        recipe.set_instructions(Some(self.instructions.as_str()));
        recipe.set_image_data(self.image);

        for ingredient in &ingredients {
            if !recipe.add_ingredient(ingredient) {
                return Err(RepositoryError::Decode(format!(
                    "recipe {} has a blank ingredient",
                    self.id
                )));
            }
        }

        Ok(recipe)
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

async fn load_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> Result<Vec<String>, RepositoryError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT ingredient FROM ingredients WHERE recipe_id = ? ORDER BY id ASC")
            .bind(recipe_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(query_error)?;

    Ok(rows.into_iter().map(|(ingredient,)| ingredient).collect())
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredients: &[String],
) -> Result<(), RepositoryError> {
    for ingredient in ingredients {
        sqlx::query("INSERT INTO ingredients (recipe_id, ingredient) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(ingredient)
            .execute(&mut *conn)
            .await
            .map_err(query_error)?;
    }
    Ok(())
}

/// Delete a recipe's ingredient rows, then the recipe row. Returns whether the recipe existed.
async fn delete_recipe(conn: &mut SqliteConnection, recipe_id: i64) -> Result<bool, RepositoryError> {
    sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(query_error)?;

    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(query_error)?;

    Ok(result.rows_affected() > 0)
}

impl SqliteRecipeRepository {
    /// Reject recipes that could not be read back under this repository's ingredient bound.
    fn check_storable<'a>(&self, recipe: &'a Recipe) -> Result<&'a str, RepositoryError> {
        let name = recipe
            .name()
            .ok_or_else(|| RepositoryError::Invalid("recipe has no name".to_string()))?;
        if recipe.ingredient_count() > self.max_ingredients {
            return Err(RepositoryError::Invalid(format!(
                "recipe has {} ingredients, limit is {}",
                recipe.ingredient_count(),
                self.max_ingredients
            )));
        }
        Ok(name)
    }

    /// Read one recipe row plus its ingredients inside a single read transaction.
    async fn fetch_by_id(&self, recipe_id: i64) -> Result<Option<Recipe>, RepositoryError> {
        let mut tx = self.pool.reader.begin().await.map_err(query_error)?;

        let row = sqlx::query(&format!("{SELECT_RECIPE} WHERE id = ?"))
            .bind(recipe_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let recipe = match row {
            Some(row) => {
                let recipe_row = RecipeRow::from_row(&row).map_err(query_error)?;
                let ingredients = load_ingredients(&mut *tx, recipe_row.id).await?;
                Some(recipe_row.into_recipe(ingredients, self.max_ingredients)?)
            }
            None => None,
        };

        tx.commit().await.map_err(query_error)?;
        Ok(recipe)
    }
}

impl RecipeRepository for SqliteRecipeRepository {
    async fn count(&self) -> Result<usize, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn add(&self, recipe: &Recipe) -> Result<RecipeId, RepositoryError> {
        let name = self.check_storable(recipe)?;

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            "INSERT INTO recipes (name, category, instructions, image) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(recipe.category().as_str())
        .bind(recipe.instructions())
        .bind(recipe.image_data())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        let recipe_id = result.last_insert_rowid();
        insert_ingredients(&mut *tx, recipe_id, &recipe.ingredients()).await?;

        tx.commit().await.map_err(query_error)?;

        tracing::debug!(id = recipe_id, name, "inserted recipe");
        Ok(RecipeId(recipe_id))
    }

    // Positions index the decoded listing, so rows skipped by `list` never shift them.
    async fn get_at(&self, position: usize) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.list().await?.into_iter().nth(position))
    }

    async fn get_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RepositoryError> {
        self.fetch_by_id(id.0).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let mut tx = self.pool.reader.begin().await.map_err(query_error)?;

        let rows = sqlx::query(&format!("{SELECT_RECIPE} ORDER BY id ASC"))
            .fetch_all(&mut *tx)
            .await
            .map_err(query_error)?;

        let ingredient_rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT recipe_id, ingredient FROM ingredients ORDER BY recipe_id ASC, id ASC",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        let mut ingredients_by_recipe: HashMap<i64, Vec<String>> = HashMap::new();
        for (recipe_id, ingredient) in ingredient_rows {
            ingredients_by_recipe
                .entry(recipe_id)
                .or_default()
                .push(ingredient);
        }

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            let recipe_row = RecipeRow::from_row(row).map_err(query_error)?;
            let recipe_id = recipe_row.id;
            let ingredients = ingredients_by_recipe
                .remove(&recipe_id)
                .unwrap_or_default();
            match recipe_row.into_recipe(ingredients, self.max_ingredients) {
                Ok(recipe) => recipes.push(recipe),
                // An undecodable row is left out; the rest of the listing stays usable.
                Err(e) => tracing::warn!(id = recipe_id, error = %e, "skipping unreadable recipe"),
            }
        }

        Ok(recipes)
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), RepositoryError> {
        let name = self.check_storable(recipe)?;
        if recipe.id().is_draft() {
            return Err(RepositoryError::NotFound);
        }
        let recipe_id = recipe.id().0;

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            "UPDATE recipes SET name = ?, category = ?, instructions = ?, image = ? WHERE id = ?",
        )
        .bind(name)
        .bind(recipe.category().as_str())
        .bind(recipe.instructions())
        .bind(recipe.image_data())
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        // Last writer wins: the stored ingredient list is replaced wholesale.
        sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        insert_ingredients(&mut *tx, recipe_id, &recipe.ingredients()).await?;

        tx.commit().await.map_err(query_error)?;

        tracing::debug!(id = recipe_id, "updated recipe");
        Ok(())
    }

    async fn remove_at(&self, position: usize) -> Result<bool, RepositoryError> {
        let Some(recipe) = self.get_at(position).await? else {
            return Ok(false);
        };
        let recipe_id = recipe.id().0;

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;
        let removed = delete_recipe(&mut *tx, recipe_id).await?;
        tx.commit().await.map_err(query_error)?;

        tracing::debug!(id = recipe_id, position, "removed recipe");
        Ok(removed)
    }

    async fn remove(&self, id: &RecipeId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;
        let removed = delete_recipe(&mut *tx, id.0).await?;
        tx.commit().await.map_err(query_error)?;

        if removed {
            tracing::debug!(%id, "removed recipe");
        }
        Ok(removed)
    }
}
