use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::ArticleData;
use super::TitleQuery;
use crate::inbound::http::router::AppState;

pub async fn get_articles_by_title(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    state
        .article_service
        .find_by_title(&query.title)
        .await
        .map_err(ApiError::from)
        .map(|articles| {
            ApiSuccess::new(
                StatusCode::OK,
                articles.iter().map(ArticleData::from).collect(),
            )
        })
}
