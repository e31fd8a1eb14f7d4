//! Infrastructure layer for Cookbook.
//!
//! Contains the SQLite implementation of the repository trait defined in
//! `cookbook-core`, the `config.toml` loader, and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod sqlite;
