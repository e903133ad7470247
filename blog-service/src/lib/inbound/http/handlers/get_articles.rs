use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ArticleData;
use crate::inbound::http::router::AppState;

pub async fn get_articles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    state
        .article_service
        .list_articles()
        .await
        .map_err(ApiError::from)
        .map(|articles| {
            ApiSuccess::new(
                StatusCode::OK,
                articles.iter().map(ArticleData::from).collect(),
            )
        })
}
