//! Filesystem helpers for Cookbook.
//!
//! Resolves the data directory and reads image files supplied by the user.
//! Image bytes are passed through untouched; no format is inspected.

use std::path::{Path, PathBuf};

/// Read an image file as an opaque blob for `Recipe::set_image_data`.
pub async fn read_image(path: &Path) -> Result<Vec<u8>, std::io::Error> {
    tokio::fs::read(path).await
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `COOKBOOK_DATA_DIR` environment variable
/// 2. Home directory (`~/.cookbook`)
/// 3. `.cookbook` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COOKBOOK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".cookbook");
    }

    // Last resort: current directory
    PathBuf::from(".cookbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_image_returns_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let bytes = vec![0xff, 0xd8, 0x00, 0x10, 0xff, 0xd9];
        tokio::fs::write(&path, &bytes).await.unwrap();

        assert_eq!(read_image(&path).await.unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_read_image_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_image(&dir.path().join("missing.png")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_resolve_data_dir_is_cookbook_dir() {
        let dir = resolve_data_dir();
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(
            std::env::var("COOKBOOK_DATA_DIR").is_ok() || name == ".cookbook",
            "unexpected data dir: {}",
            dir.display()
        );
    }
}
