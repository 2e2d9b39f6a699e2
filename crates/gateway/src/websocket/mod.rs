//! WebSocket endpoints for the gateway

pub mod chat;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create all WebSocket routes
pub fn create_websocket_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws/chats/:chat_id", get(chat::chat_websocket_handler))
}
