//! Repository trait definitions (ports) and the in-memory implementation.
//!
//! The persisted implementation lives in cookbook-infra. The core crate never
//! depends on any specific storage technology.

pub mod memory;
pub mod recipe;
