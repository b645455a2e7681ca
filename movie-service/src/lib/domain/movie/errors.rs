use thiserror::Error;

/// Error for MovieId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for catalog lookups
#[derive(Debug, Clone, Error)]
pub enum MovieError {
    #[error("Invalid movie ID: {0}")]
    InvalidMovieId(#[from] MovieIdError),

    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("The genre you are looking for does not exist in our database: {0}")]
    GenreNotFound(String),

    #[error("The director you are looking for does not exist in our database: {0}")]
    DirectorNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
