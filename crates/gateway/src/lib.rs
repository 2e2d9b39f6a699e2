//! # Agora Gateway Crate
//!
//! HTTP and websocket entry point for the Agora backend. Requests are
//! authenticated here, translated into calls on the chat and commissioner
//! services, and their results mapped back onto JSON responses.
//!
//! - **REST**: `/api/v1` endpoints with OpenAPI documentation
//! - **WebSocket**: per-chat event streams fed by the realtime hub
//! - **State**: the pool, token manager and services shared by handlers
//! - **Middleware**: authentication, CORS and request logging
//!
//! ```no_run
//! use agora_config::AppConfig;
//! use agora_gateway::{build_router, AppState};
//!
//! # async fn run(pool: sqlx::SqlitePool) -> std::io::Result<()> {
//! let state = AppState::new(pool, &AppConfig::default());
//! let app = build_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod realtime;
pub mod rest;
pub mod state;
pub mod websocket;

pub use error::{GatewayError, GatewayResult};
pub use realtime::ChatHub;
pub use state::AppState;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

/// Create the main application router with all routes
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let public = Router::new()
        .route("/health", get(rest::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/api/v1/commissioners/login", post(rest::commissioner::login));

    let protected = Router::new()
        .nest("/api/v1", rest::create_rest_routes())
        .merge(websocket::create_websocket_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    public
        .merge(protected)
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
        .with_state(state)
}
