//! RecipeManager driven against the SQLite repository.

use cookbook_core::service::recipe::RecipeManager;
use cookbook_infra::sqlite::pool::{DatabasePool, database_url_for};
use cookbook_infra::sqlite::recipe::SqliteRecipeRepository;
use cookbook_types::recipe::{FoodCategory, Recipe};

async fn sqlite_manager(dir: &tempfile::TempDir) -> RecipeManager<SqliteRecipeRepository> {
    bounded_manager(dir, 50).await
}

async fn bounded_manager(
    dir: &tempfile::TempDir,
    max_ingredients: usize,
) -> RecipeManager<SqliteRecipeRepository> {
    let pool = DatabasePool::new(&database_url_for(dir.path())).await.unwrap();
    RecipeManager::new(SqliteRecipeRepository::new(pool, max_ingredients))
}

fn draft(name: &str, ingredients: &[&str]) -> Recipe {
    let mut recipe = Recipe::new(50);
    recipe.set_name(name).unwrap();
    for ingredient in ingredients {
        recipe.add_ingredient(ingredient);
    }
    recipe
}

#[tokio::test]
async fn update_replaces_all_ingredients() {
    let dir = tempfile::tempdir().unwrap();
    let manager = sqlite_manager(&dir).await;

    let mut recipe = draft("Fish pie", &["Cod", "Potato", "Leek"]);
    recipe.set_category(FoodCategory::Fish);
    assert!(manager.add(&recipe).await);

    let mut edited = manager.get(0).await.unwrap();
    edited.clear_ingredients();
    edited.add_ingredient("Haddock");
    edited.add_ingredient("Mash");
    assert!(manager.update(&edited).await);

    let found = manager.get(0).await.unwrap();
    assert_eq!(found.ingredients(), vec!["Haddock", "Mash"]);
    assert_eq!(found.category(), FoodCategory::Fish);
}

#[tokio::test]
async fn draft_persisted_then_gone() {
    let dir = tempfile::tempdir().unwrap();
    let manager = sqlite_manager(&dir).await;

    let recipe = draft("Calzone", &["Dough", "Ricotta"]);
    assert!(recipe.id().is_draft());
    assert!(manager.save(&recipe).await);
    // The caller's draft is never touched by the repository.
    assert!(recipe.id().is_draft());

    let persisted = manager.get(0).await.unwrap();
    assert!(!persisted.id().is_draft());

    let mut renamed = persisted.clone();
    renamed.set_name("Folded pizza").unwrap();
    assert!(manager.save(&renamed).await);
    assert_eq!(manager.count().await, 1);
    assert_eq!(
        manager.get_by_id(&persisted.id()).await.unwrap().name(),
        Some("Folded pizza")
    );

    assert!(manager.remove(&persisted.id()).await);
    assert_eq!(manager.count().await, 0);
    assert!(manager.get_by_id(&persisted.id()).await.is_none());
    assert!(!manager.update(&renamed).await);
}

#[tokio::test]
async fn data_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    {
        let manager = sqlite_manager(&dir).await;
        let mut recipe = draft("Borscht", &["Beetroot", "Cabbage"]);
        recipe.set_category(FoodCategory::Soups);
        recipe.set_image_data(Some(vec![7, 7, 7]));
        assert!(manager.add(&recipe).await);
    }

    let manager = sqlite_manager(&dir).await;
    let found = manager.get(0).await.unwrap();
    assert_eq!(found.name(), Some("Borscht"));
    assert_eq!(found.ingredients(), vec!["Beetroot", "Cabbage"]);
    assert_eq!(found.image_data(), Some(&[7u8, 7, 7][..]));
}

#[tokio::test]
async fn remove_at_matches_listing() {
    let dir = tempfile::tempdir().unwrap();
    let manager = sqlite_manager(&dir).await;
    for name in ["One", "Two", "Three", "Four"] {
        assert!(manager.add(&draft(name, &["x"])).await);
    }

    assert!(manager.remove_at(0).await);
    let names: Vec<String> = manager
        .list()
        .await
        .iter()
        .map(|r| r.name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Two", "Three", "Four"]);
    assert!(!manager.remove_at(3).await);
    assert_eq!(manager.count().await, 3);
}

#[tokio::test]
async fn recipe_over_ingredient_bound_is_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let manager = bounded_manager(&dir, 2).await;
    assert!(manager.add(&draft("Good", &["Rice"])).await);

    let mut wide = Recipe::new(5);
    wide.set_name("Paella").unwrap();
    for ingredient in ["Rice", "Saffron", "Prawns"] {
        assert!(wide.add_ingredient(ingredient));
    }
    assert!(!manager.add(&wide).await);

    assert_eq!(manager.count().await, 1);
    let listed = manager.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), Some("Good"));
    assert!(manager.get(1).await.is_none());
}
