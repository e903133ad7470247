use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use super::errors::ArticleDateError;
use super::errors::ArticleFieldError;

/// Article entity.
///
/// `author` is always the username of the identity that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub date: ArticleDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Calendar date of publication, rendered as `DD-MM-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArticleDate(NaiveDate);

impl ArticleDate {
    const FORMAT: &'static str = "%d-%m-%Y";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `DD-MM-YYYY` string.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a valid date in that format
    pub fn parse(s: &str) -> Result<Self, ArticleDateError> {
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| ArticleDateError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for ArticleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Command to publish an article.
///
/// Built from client-supplied title and description only; the author comes
/// from the authenticated identity.
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: String,
    pub description: String,
}

impl CreateArticleCommand {
    /// # Errors
    /// * `EmptyTitle` - Title is blank
    /// * `EmptyDescription` - Description is blank
    pub fn new(title: String, description: String) -> Result<Self, ArticleFieldError> {
        if title.trim().is_empty() {
            return Err(ArticleFieldError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(ArticleFieldError::EmptyDescription);
        }
        Ok(Self { title, description })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_renders_day_month_year() {
        let date = ArticleDate::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());

        assert_eq!(date.to_string(), "07-03-2024");
        assert_eq!(ArticleDate::parse("07-03-2024"), Ok(date));
    }

    #[test]
    fn test_date_rejects_other_formats() {
        assert!(ArticleDate::parse("2024-03-07").is_err());
        assert!(ArticleDate::parse("31-02-2024").is_err());
        assert!(ArticleDate::parse("").is_err());
    }

    #[test]
    fn test_create_command_requires_fields() {
        assert!(CreateArticleCommand::new("Title".to_string(), "Body".to_string()).is_ok());
        assert_eq!(
            CreateArticleCommand::new(" ".to_string(), "Body".to_string()).unwrap_err(),
            ArticleFieldError::EmptyTitle
        );
        assert_eq!(
            CreateArticleCommand::new("Title".to_string(), String::new()).unwrap_err(),
            ArticleFieldError::EmptyDescription
        );
    }
}
