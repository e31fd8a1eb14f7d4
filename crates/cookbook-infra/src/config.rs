//! Configuration loader for Cookbook.
//!
//! Reads `config.toml` from the data directory (`~/.cookbook/` in production)
//! and deserializes it into [`CookbookConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use cookbook_types::config::CookbookConfig;

use crate::sqlite::pool::database_url_for;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`CookbookConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> CookbookConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return CookbookConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return CookbookConfig::default();
        }
    };

    match toml::from_str::<CookbookConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            CookbookConfig::default()
        }
    }
}

/// Resolve the database URL: explicit `database_url` from config, else
/// `cookbook.db` inside the data directory.
pub fn resolve_database_url(config: &CookbookConfig, data_dir: &Path) -> String {
    config
        .database_url
        .clone()
        .unwrap_or_else(|| database_url_for(data_dir))
}
