use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::router::AppState;
use super::routes::Route;

/// Runs the authorization gate for `route` before its handler.
///
/// On success the caller's identity (if the route is protected) is placed in
/// the request extensions; on failure the handler never runs.
pub async fn authorize(
    State((state, route)): State<(AppState, Route)>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Some(identity) = state.gate.authorize(route, authorization)? {
        tracing::debug!(
            route = route.name(),
            username = %identity.username(),
            "Request authorized"
        );
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}
