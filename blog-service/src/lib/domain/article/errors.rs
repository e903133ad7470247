use thiserror::Error;

/// Error for article field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleFieldError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Description is required")]
    EmptyDescription,
}

/// Error for article date parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleDateError {
    #[error("Invalid article date (expected DD-MM-YYYY): {0}")]
    InvalidFormat(String),
}

/// Top-level error for article operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Validation error: {0}")]
    Invalid(#[from] ArticleFieldError),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
