use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::UserData;
use super::UserIdQuery;
use crate::inbound::http::router::AppState;

pub async fn get_user_by_id(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserIdQuery>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = query.user_id()?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
