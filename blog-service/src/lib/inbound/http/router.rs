use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::ApiError;
use super::middleware::authorize;
use super::routes::Route;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub gate: Arc<AuthorizationGate<Route>>,
}

/// Build the router from the route table.
///
/// Every route gets its own gate layer, so the public/protected decision is
/// made before the handler runs. The layer wraps the whole method router,
/// since `any` registers its handler as the method fallback. `request_timeout` bounds each request; when
/// it elapses the handler future is dropped.
pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    article_service: Arc<dyn ArticleServicePort>,
    gate: Arc<AuthorizationGate<Route>>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        gate,
    };

    let routes = Route::ALL
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(
                route.path(),
                route
                    .handler()
                    .layer(middleware::from_fn_with_state(
                        (state.clone(), route),
                        authorize,
                    )),
            )
        });

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .fallback(not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// The timeout layer answers with a bare 408; give it the usual error body.
async fn timeout_envelope(response: Response<Body>) -> Response<Body> {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::request_timeout().into_response();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_response_gets_error_body() {
        let response = timeout_envelope(StatusCode::REQUEST_TIMEOUT.into_response()).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 408);
        assert_eq!(body["data"]["message"], "Request timed out");
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let response = timeout_envelope(StatusCode::NO_CONTENT.into_response()).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
