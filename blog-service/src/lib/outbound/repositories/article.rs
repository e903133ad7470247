use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleDate;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleRepository;

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: Uuid,
    title: String,
    description: String,
    author: String,
    date: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let date = ArticleDate::parse(&row.date)
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        Ok(Article {
            id: ArticleId(row.id),
            title: row.title,
            description: row.description,
            author: row.author,
            date,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: Article) -> Result<Article, ArticleError> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, title, description, author, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(article.id.0)
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.author)
        .bind(article.date.to_string())
        .bind(article.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        Ok(article)
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, author, date, created_at
            FROM articles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
        .into_iter()
        .map(Article::try_from)
        .collect()
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>, ArticleError> {
        sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, author, date, created_at
            FROM articles
            WHERE title = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
        .into_iter()
        .map(Article::try_from)
        .collect()
    }

    async fn delete_one_by_title(&self, title: &str) -> Result<u64, ArticleError> {
        let result = sqlx::query(
            r#"
            DELETE FROM articles
            WHERE id = (
                SELECT id FROM articles
                WHERE title = $1
                ORDER BY created_at ASC
                LIMIT 1
            )
            "#,
        )
        .bind(title)
        .execute(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
