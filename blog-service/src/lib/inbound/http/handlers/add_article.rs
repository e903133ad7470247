use auth::AuthenticatedIdentity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ArticleData;
use crate::domain::article::models::CreateArticleCommand;
use crate::inbound::http::router::AppState;

/// The author is always the caller's identity. Without one (e.g. the route
/// was configured public) the request is refused.
pub async fn add_article(
    State(state): State<AppState>,
    identity: Option<Extension<AuthenticatedIdentity>>,
    ApiJson(body): ApiJson<AddArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let Extension(identity) = identity.ok_or_else(ApiError::unauthorized)?;
    let command = CreateArticleCommand::new(body.title, body.description)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .article_service
        .add_article(command, &identity)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, article.into()))
}

/// HTTP request body for a new article.
///
/// `author` and `date` are not read from the client; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddArticleRequest {
    title: String,
    description: String,
}
