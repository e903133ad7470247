use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::MessageData;
use super::TitleQuery;
use crate::inbound::http::router::AppState;

pub async fn delete_article_by_title(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .article_service
        .delete_by_title(&query.title)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Article deleted successfully"),
            )
        })
}
