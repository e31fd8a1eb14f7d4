//! Recipe management service.
//!
//! `RecipeManager` is the boundary between callers and storage. Repository
//! errors stop here: they are logged and turned into `false`, `None`, `0` or
//! an empty list, so callers see the same contract whether the recipes live
//! in memory or in a database.

use cookbook_types::error::RepositoryError;
use cookbook_types::recipe::{Recipe, RecipeId};

use crate::repository::recipe::RecipeRepository;

/// Service owning the authoritative recipe collection.
///
/// Generic over the repository trait so the same rules apply to every backend.
pub struct RecipeManager<R: RecipeRepository> {
    repo: R,
}

impl<R: RecipeRepository> RecipeManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Number of stored recipes, or 0 if storage cannot be reached.
    pub async fn count(&self) -> usize {
        match self.repo.count().await {
            Ok(count) => count,
            Err(e) => {
                log_failure("count", &e);
                0
            }
        }
    }

    /// Store a copy of `recipe` as a new entry.
    ///
    /// Returns `false` for an unnamed draft, a full repository, or a storage failure.
    pub async fn add(&self, recipe: &Recipe) -> bool {
        if !recipe.is_storable() {
            tracing::debug!("rejecting recipe without a name");
            return false;
        }

        match self.repo.add(recipe).await {
            Ok(id) => {
                tracing::debug!(%id, name = recipe.name(), "recipe added");
                true
            }
            Err(e) => {
                log_failure("add", &e);
                false
            }
        }
    }

    /// The recipe at `position` in the current listing.
    pub async fn get(&self, position: usize) -> Option<Recipe> {
        match self.repo.get_at(position).await {
            Ok(recipe) => recipe,
            Err(e) => {
                log_failure("get", &e);
                None
            }
        }
    }

    /// The recipe with the given identity.
    pub async fn get_by_id(&self, id: &RecipeId) -> Option<Recipe> {
        match self.repo.get_by_id(id).await {
            Ok(recipe) => recipe,
            Err(e) => {
                log_failure("get_by_id", &e);
                None
            }
        }
    }

    /// All recipes in listing order.
    pub async fn list(&self) -> Vec<Recipe> {
        match self.repo.list().await {
            Ok(recipes) => recipes,
            Err(e) => {
                log_failure("list", &e);
                Vec::new()
            }
        }
    }

    /// Overwrite a stored recipe, replacing its whole ingredient list.
    ///
    /// `recipe` must carry the identity of a stored recipe.
    pub async fn update(&self, recipe: &Recipe) -> bool {
        if !recipe.is_storable() {
            tracing::debug!(id = %recipe.id(), "rejecting update of recipe without a name");
            return false;
        }

        match self.repo.update(recipe).await {
            Ok(()) => {
                tracing::debug!(id = %recipe.id(), "recipe updated");
                true
            }
            Err(e) => {
                log_failure("update", &e);
                false
            }
        }
    }

    /// Create a draft, or replace the stored recipe it was copied from.
    pub async fn save(&self, recipe: &Recipe) -> bool {
        if recipe.id().is_draft() {
            self.add(recipe).await
        } else {
            self.update(recipe).await
        }
    }

    /// Delete the recipe at `position`; later recipes move up by one.
    pub async fn remove_at(&self, position: usize) -> bool {
        match self.repo.remove_at(position).await {
            Ok(removed) => removed,
            Err(e) => {
                log_failure("remove_at", &e);
                false
            }
        }
    }

    /// Delete a recipe and all of its ingredients by identity.
    pub async fn remove(&self, id: &RecipeId) -> bool {
        match self.repo.remove(id).await {
            Ok(removed) => {
                if removed {
                    tracing::debug!(%id, "recipe removed");
                }
                removed
            }
            Err(e) => {
                log_failure("remove", &e);
                false
            }
        }
    }
}

fn log_failure(operation: &str, error: &RepositoryError) {
    match error {
        RepositoryError::NotFound
        | RepositoryError::Capacity(_)
        | RepositoryError::Invalid(_) => {
            tracing::debug!(operation, %error, "recipe operation rejected");
        }
        _ => {
            tracing::warn!(operation, %error, "recipe storage failure");
        }
    }
}
