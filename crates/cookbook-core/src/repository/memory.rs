//! In-memory bounded recipe repository.
//!
//! Holds at most `max_recipes` recipes in insertion order. Inserts past the
//! bound are rejected rather than truncated, and removals compact the list so
//! later recipes move one position earlier. Stored recipes are private copies:
//! callers only ever hand in or receive clones.

use cookbook_types::error::RepositoryError;
use cookbook_types::recipe::{Recipe, RecipeId};
use tokio::sync::RwLock;

use super::recipe::RecipeRepository;

struct MemoryState {
    recipes: Vec<Recipe>,
    /// Last identity handed out. Identities are never reused.
    last_id: i64,
}

/// Fixed-capacity implementation of `RecipeRepository`.
pub struct InMemoryRecipeRepository {
    max_recipes: usize,
    state: RwLock<MemoryState>,
}

impl InMemoryRecipeRepository {
    pub fn new(max_recipes: usize) -> Self {
        Self {
            max_recipes,
            state: RwLock::new(MemoryState {
                recipes: Vec::with_capacity(max_recipes),
                last_id: 0,
            }),
        }
    }

    pub fn max_recipes(&self) -> usize {
        self.max_recipes
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.state.read().await.recipes.len())
    }

    async fn add(&self, recipe: &Recipe) -> Result<RecipeId, RepositoryError> {
        if !recipe.is_storable() {
            return Err(RepositoryError::Invalid("recipe has no name".to_string()));
        }

        let mut state = self.state.write().await;
        if state.recipes.len() >= self.max_recipes {
            return Err(RepositoryError::Capacity(self.max_recipes));
        }

        state.last_id += 1;
        let id = RecipeId(state.last_id);
        let mut stored = recipe.clone();
        stored.set_id(id);
        state.recipes.push(stored);

        Ok(id)
    }

    async fn get_at(&self, position: usize) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.state.read().await.recipes.get(position).cloned())
    }

    async fn get_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.recipes.iter().find(|r| r.id() == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Recipe>, RepositoryError> {
        Ok(self.state.read().await.recipes.clone())
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), RepositoryError> {
        if !recipe.is_storable() {
            return Err(RepositoryError::Invalid("recipe has no name".to_string()));
        }
        if recipe.id().is_draft() {
            return Err(RepositoryError::NotFound);
        }

        let mut state = self.state.write().await;
        let slot = state
            .recipes
            .iter_mut()
            .find(|r| r.id() == recipe.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = recipe.clone();

        Ok(())
    }

    async fn remove_at(&self, position: usize) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        if position >= state.recipes.len() {
            return Ok(false);
        }
        state.recipes.remove(position);
        Ok(true)
    }

    async fn remove(&self, id: &RecipeId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        match state.recipes.iter().position(|r| r.id() == *id) {
            Some(position) => {
                state.recipes.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_types::recipe::FoodCategory;

    fn make_recipe(name: &str, ingredients: &[&str]) -> Recipe {
        let mut recipe = Recipe::new(10);
        recipe.set_name(name).unwrap();
        recipe.set_category(FoodCategory::Pasta);
        for ingredient in ingredients {
            recipe.add_ingredient(ingredient);
        }
        recipe
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let repo = InMemoryRecipeRepository::new(5);
        let a = repo.add(&make_recipe("A", &[])).await.unwrap();
        let b = repo.add(&make_recipe("B", &[])).await.unwrap();
        assert_eq!(a, RecipeId(1));
        assert_eq!(b, RecipeId(2));
        assert_eq!(repo.count().await.unwrap(), 2);

        let stored = repo.get_at(1).await.unwrap().unwrap();
        assert_eq!(stored.name(), Some("B"));
        assert_eq!(stored.id(), b);
    }

    #[tokio::test]
    async fn test_add_beyond_capacity_is_rejected() {
        let repo = InMemoryRecipeRepository::new(1);
        repo.add(&make_recipe("A", &[])).await.unwrap();

        let err = repo.add(&make_recipe("B", &[])).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Capacity(1)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_unnamed_draft() {
        let repo = InMemoryRecipeRepository::new(2);
        let err = repo.add(&Recipe::new(5)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stored_copy_is_independent_of_caller() {
        let repo = InMemoryRecipeRepository::new(2);
        let mut draft = make_recipe("Carbonara", &["Spaghetti", "Eggs"]);
        repo.add(&draft).await.unwrap();

        draft.add_ingredient("Cream");
        draft.set_name("Not carbonara").unwrap();

        let mut fetched = repo.get_at(0).await.unwrap().unwrap();
        assert_eq!(fetched.name(), Some("Carbonara"));
        assert_eq!(fetched.ingredients(), vec!["Spaghetti", "Eggs"]);

        fetched.clear_ingredients();
        let again = repo.get_at(0).await.unwrap().unwrap();
        assert_eq!(again.ingredient_count(), 2);
    }

    #[tokio::test]
    async fn test_get_at_out_of_range() {
        let repo = InMemoryRecipeRepository::new(2);
        assert!(repo.get_at(0).await.unwrap().is_none());
        repo.add(&make_recipe("A", &[])).await.unwrap();
        assert!(repo.get_at(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_at_shifts_later_entries() {
        let repo = InMemoryRecipeRepository::new(5);
        for name in ["A", "B", "C", "D"] {
            repo.add(&make_recipe(name, &[])).await.unwrap();
        }

        assert!(repo.remove_at(1).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 3);

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(repo.get_at(1).await.unwrap().unwrap().name(), Some("C"));
        assert_eq!(repo.get_at(2).await.unwrap().unwrap().name(), Some("D"));
    }

    #[tokio::test]
    async fn test_remove_at_invalid_is_noop() {
        let repo = InMemoryRecipeRepository::new(2);
        repo.add(&make_recipe("A", &[])).await.unwrap();
        assert!(!repo.remove_at(1).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_frees_capacity_without_reusing_ids() {
        let repo = InMemoryRecipeRepository::new(1);
        let first = repo.add(&make_recipe("A", &[])).await.unwrap();
        assert!(repo.remove(&first).await.unwrap());
        assert!(!repo.remove(&first).await.unwrap());

        let second = repo.add(&make_recipe("B", &[])).await.unwrap();
        assert_ne!(first, second);
        assert!(repo.get_by_id(&first).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_by_identity() {
        let repo = InMemoryRecipeRepository::new(3);
        let id = repo
            .add(&make_recipe("Stew", &["Beef", "Carrot", "Onion"]))
            .await
            .unwrap();

        let mut edited = repo.get_by_id(&id).await.unwrap().unwrap();
        edited.clear_ingredients();
        edited.add_ingredient("Lentils");
        edited.add_ingredient("Potato");
        edited.set_category(FoodCategory::Vegan);
        repo.update(&edited).await.unwrap();
        repo.update(&edited).await.unwrap();

        let stored = repo.get_at(0).await.unwrap().unwrap();
        assert_eq!(stored.ingredients(), vec!["Lentils", "Potato"]);
        assert_eq!(stored.category(), FoodCategory::Vegan);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_identity() {
        let repo = InMemoryRecipeRepository::new(3);
        let draft = make_recipe("Ghost", &[]);
        assert!(matches!(
            repo.update(&draft).await,
            Err(RepositoryError::NotFound)
        ));

        let mut stale = make_recipe("Ghost", &[]);
        stale.set_id(RecipeId(99));
        assert!(matches!(
            repo.update(&stale).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
