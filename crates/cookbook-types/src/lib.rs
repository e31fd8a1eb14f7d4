//! Shared domain types for Cookbook.
//!
//! This crate contains the domain values used across the workspace:
//! Recipe, its identity and category, configuration, and the error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod recipe;
