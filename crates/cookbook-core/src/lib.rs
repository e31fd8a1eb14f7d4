//! Business logic and repository trait definitions for Cookbook.
//!
//! This crate defines the "port" (repository trait) that the infrastructure
//! layer implements, plus the in-memory bounded repository and the recipe
//! manager service. It depends only on `cookbook-types` -- never on
//! `cookbook-infra` or any database crate.

pub mod repository;
pub mod service;
