//! REST API endpoints for the gateway

pub mod chat;
pub mod commissioner;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Routes mounted under `/api/v1`, all behind the auth middleware.
pub fn create_rest_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chats", get(chat::list_chats))
        .route("/chats/all", get(chat::list_all_chats))
        .route("/chats/user/:user_id", get(chat::list_chats_by_user))
        .route(
            "/chats/:chat_id/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .route(
            "/commissioners",
            get(commissioner::list_commissioners).post(commissioner::create_commissioner),
        )
        .route("/commissioners/assign-order", post(commissioner::assign_order))
        .route(
            "/commissioners/:id",
            get(commissioner::get_commissioner)
                .patch(commissioner::update_commissioner)
                .delete(commissioner::delete_commissioner),
        )
}

/// Error body written by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageOnlyResponse {
    pub message: String,
}
