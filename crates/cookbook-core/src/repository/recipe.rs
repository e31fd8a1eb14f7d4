//! Recipe repository trait definition.

use cookbook_types::error::RepositoryError;
use cookbook_types::recipe::{Recipe, RecipeId};

/// Repository trait for recipe persistence.
///
/// Recipes are addressed two ways. A *position* (`usize`) is an index into the
/// current listing and shifts whenever an earlier recipe is removed. An
/// *identity* (`RecipeId`) is assigned on `add` and never changes. The two
/// are separate methods with separate argument types.
///
/// Listing order is insertion order for every implementation, so
/// `get_at(i)` always equals `list()[i]`.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RecipeRepository: Send + Sync {
    /// Number of stored recipes.
    fn count(&self) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;

    /// Store a copy of `recipe` under a freshly generated identity.
    ///
    /// The identity carried by `recipe` itself is ignored.
    fn add(
        &self,
        recipe: &Recipe,
    ) -> impl std::future::Future<Output = Result<RecipeId, RepositoryError>> + Send;

    /// The recipe at `position` in the listing, if any.
    fn get_at(
        &self,
        position: usize,
    ) -> impl std::future::Future<Output = Result<Option<Recipe>, RepositoryError>> + Send;

    /// The recipe with the given identity, if it still exists.
    fn get_by_id(
        &self,
        id: &RecipeId,
    ) -> impl std::future::Future<Output = Result<Option<Recipe>, RepositoryError>> + Send;

    /// Every stored recipe, in listing order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Recipe>, RepositoryError>> + Send;

    /// Replace the stored recipe with the same identity, ingredients included.
    ///
    /// Returns `RepositoryError::NotFound` when no recipe has that identity.
    fn update(
        &self,
        recipe: &Recipe,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the recipe at `position`. Returns `false` when out of range.
    fn remove_at(
        &self,
        position: usize,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete the recipe and its ingredients by identity.
    ///
    /// Returns `false` when nothing had that identity.
    fn remove(
        &self,
        id: &RecipeId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
