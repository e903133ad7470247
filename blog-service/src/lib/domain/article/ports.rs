use async_trait::async_trait;
use auth::AuthenticatedIdentity;

use super::errors::ArticleError;
use super::models::Article;
use super::models::CreateArticleCommand;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Publish an article attributed to `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn add_article(
        &self,
        command: CreateArticleCommand,
        author: &AuthenticatedIdentity,
    ) -> Result<Article, ArticleError>;

    /// All articles, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError>;

    /// Articles whose title matches exactly; possibly empty.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>, ArticleError>;

    /// Delete one article with this title.
    ///
    /// # Errors
    /// * `NotFound` - No article has this title
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_title(&self, title: &str) -> Result<(), ArticleError>;
}

/// Persistence operations for articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, article: Article) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>, ArticleError>;

    /// Delete the oldest article with this title.
    ///
    /// # Returns
    /// Number of deleted rows (0 or 1)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_one_by_title(&self, title: &str) -> Result<u64, ArticleError>;
}
