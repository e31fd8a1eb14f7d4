//! Application state wiring the recipe manager to a storage backend.
//!
//! The manager is generic over the repository trait; AppState pins it to the
//! backend selected in `config.toml`.

use std::path::Path;

use cookbook_core::repository::memory::InMemoryRecipeRepository;
use cookbook_core::repository::recipe::RecipeRepository;
use cookbook_core::service::recipe::RecipeManager;
use cookbook_infra::config::resolve_database_url;
use cookbook_infra::sqlite::pool::DatabasePool;
use cookbook_infra::sqlite::recipe::SqliteRecipeRepository;
use cookbook_types::config::CookbookConfig;

/// State shared by every command handler.
pub struct AppState<R: RecipeRepository> {
    pub recipes: RecipeManager<R>,
    pub config: CookbookConfig,
}

impl AppState<InMemoryRecipeRepository> {
    /// Bounded in-memory collection; contents last for this process only.
    pub fn in_memory(config: CookbookConfig) -> Self {
        let repo = InMemoryRecipeRepository::new(config.max_recipes);
        Self {
            recipes: RecipeManager::new(repo),
            config,
        }
    }
}

impl AppState<SqliteRecipeRepository> {
    /// Connect to the SQLite database (running migrations) and wire the manager.
    pub async fn sqlite(config: CookbookConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let db_url = resolve_database_url(&config, data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;
        let repo = SqliteRecipeRepository::new(db_pool, config.max_ingredients);

        Ok(Self {
            recipes: RecipeManager::new(repo),
            config,
        })
    }
}
