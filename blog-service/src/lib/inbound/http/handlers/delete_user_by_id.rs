use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::MessageData;
use super::UserIdQuery;
use crate::inbound::http::router::AppState;

pub async fn delete_user_by_id(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserIdQuery>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let user_id = query.user_id()?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("User deleted successfully")))
}
