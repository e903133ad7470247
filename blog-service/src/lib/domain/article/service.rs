use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticatedIdentity;
use chrono::Utc;

use super::errors::ArticleError;
use super::models::Article;
use super::models::ArticleDate;
use super::models::ArticleId;
use super::models::CreateArticleCommand;
use super::ports::ArticleRepository;
use super::ports::ArticleServicePort;

pub struct ArticleService<AR>
where
    AR: ArticleRepository,
{
    repository: Arc<AR>,
}

impl<AR> ArticleService<AR>
where
    AR: ArticleRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> ArticleServicePort for ArticleService<AR>
where
    AR: ArticleRepository,
{
    async fn add_article(
        &self,
        command: CreateArticleCommand,
        author: &AuthenticatedIdentity,
    ) -> Result<Article, ArticleError> {
        let now = Utc::now();
        let article = Article {
            id: ArticleId::new(),
            title: command.title,
            description: command.description,
            author: author.username().to_string(),
            date: ArticleDate::new(now.date_naive()),
            created_at: now,
        };

        let created = self.repository.create(article).await?;

        tracing::info!(
            article_id = %created.id,
            author = %created.author,
            "Article created"
        );

        Ok(created)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError> {
        self.repository.list_all().await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>, ArticleError> {
        self.repository.find_by_title(title).await
    }

    async fn delete_by_title(&self, title: &str) -> Result<(), ArticleError> {
        match self.repository.delete_one_by_title(title).await? {
            0 => Err(ArticleError::NotFound(title.to_string())),
            _ => {
                tracing::info!(title = %title, "Article deleted");
                Ok(())
            }
        }
    }
}
