//! Middleware for authentication and other cross-cutting concerns

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::GatewayError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Resolves the caller from a bearer token, the auth cookie, or a `?token=` query
/// parameter (browsers cannot set headers on websocket handshakes), then stores the
/// `Principal` in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = extract_token(&request, &state.auth_config().cookie_name).ok_or_else(|| {
        GatewayError::AuthenticationFailed("Missing authentication token".to_string())
    })?;

    let principal = state.tokens().authenticate(&token)?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

fn extract_token(request: &Request, cookie_name: &str) -> Option<String> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer
        .or_else(|| {
            CookieJar::from_headers(request.headers())
                .get(cookie_name)
                .map(|cookie| cookie.value().to_string())
        })
        .or_else(|| {
            Query::<TokenQuery>::try_from_uri(request.uri())
                .ok()
                .and_then(|Query(query)| query.token)
        })
}

pub fn create_trace_middleware(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// CORS middleware for cross-origin requests
pub fn create_cors_middleware() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(builder: axum::http::request::Builder) -> Request {
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let req = request(
            Request::builder()
                .uri("/api/v1/chats")
                .header(header::AUTHORIZATION, "Bearer from-header")
                .header(header::COOKIE, "token=from-cookie"),
        );
        assert_eq!(extract_token(&req, "token").as_deref(), Some("from-header"));
    }

    #[test]
    fn cookie_is_used_when_header_missing() {
        let req = request(
            Request::builder()
                .uri("/api/v1/chats")
                .header(header::COOKIE, "other=1; session=abc"),
        );
        assert_eq!(extract_token(&req, "session").as_deref(), Some("abc"));
        assert_eq!(extract_token(&req, "token"), None);
    }

    #[test]
    fn query_token_is_accepted() {
        let req = request(Request::builder().uri("/ws/chats/1?token=xyz"));
        assert_eq!(extract_token(&req, "token").as_deref(), Some("xyz"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let req = request(
            Request::builder()
                .uri("/api/v1/chats")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_token(&req, "token"), None);
    }
}
