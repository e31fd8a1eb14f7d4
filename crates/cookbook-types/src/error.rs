use thiserror::Error;

/// Errors raised by a `Recipe` when a mutation would make it invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("invalid recipe name: {0}")]
    InvalidName(String),
}

/// Errors from repository operations (used by trait definitions in cookbook-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("recipe not found")]
    NotFound,

    #[error("repository is full ({0} recipes)")]
    Capacity(usize),

    #[error("recipe cannot be stored: {0}")]
    Invalid(String),

    #[error("stored recipe could not be decoded: {0}")]
    Decode(String),
}
