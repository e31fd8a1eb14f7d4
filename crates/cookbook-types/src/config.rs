//! Configuration types for Cookbook.
//!
//! `CookbookConfig` represents the top-level `config.toml` that selects the
//! storage backend and the collection bounds.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::recipe::{DEFAULT_MAX_INGREDIENTS, DEFAULT_MAX_RECIPES};

/// Which repository implementation backs the recipe collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Fixed-capacity collection that lives for the duration of the process.
    Memory,
    /// Durable SQLite database with a recipes table and an ingredients table.
    #[default]
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Top-level configuration.
///
/// Loaded from `~/.cookbook/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookbookConfig {
    #[serde(default)]
    pub storage: StorageBackend,

    /// Maximum number of recipes held by the memory backend.
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,

    /// Maximum number of ingredients per recipe.
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,

    /// Explicit database URL; defaults to `{data_dir}/cookbook.db`.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_max_recipes() -> usize {
    DEFAULT_MAX_RECIPES
}

fn default_max_ingredients() -> usize {
    DEFAULT_MAX_INGREDIENTS
}

impl Default for CookbookConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            max_recipes: default_max_recipes(),
            max_ingredients: default_max_ingredients(),
            database_url: None,
        }
    }
}
