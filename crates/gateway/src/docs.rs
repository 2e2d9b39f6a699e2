//! OpenAPI document served at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::rest;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::health::health_check,
        rest::chat::list_chats,
        rest::chat::list_all_chats,
        rest::chat::list_chats_by_user,
        rest::chat::list_messages,
        rest::chat::send_message,
        rest::commissioner::login,
        rest::commissioner::create_commissioner,
        rest::commissioner::list_commissioners,
        rest::commissioner::get_commissioner,
        rest::commissioner::update_commissioner,
        rest::commissioner::delete_commissioner,
        rest::commissioner::assign_order,
    ),
    components(
        schemas(
            rest::ErrorResponse,
            rest::MessageOnlyResponse,
            rest::health::HealthResponse,
            rest::chat::ChatResponse,
            rest::chat::ContactResponse,
            rest::chat::ChatListItem,
            rest::chat::ChatsResponse,
            rest::chat::AllChatsResponse,
            rest::chat::UserChatsResponse,
            rest::chat::MessageResponse,
            rest::chat::MessagesResponse,
            rest::chat::SentMessageResponse,
            rest::chat::SendMessageRequest,
            rest::commissioner::CommissionerResponse,
            rest::commissioner::CommissionerEnvelope,
            rest::commissioner::CommissionersResponse,
            rest::commissioner::CreateCommissionerRequest,
            rest::commissioner::UpdateCommissionerRequest,
            rest::commissioner::LoginRequest,
            rest::commissioner::LoginResponse,
            rest::commissioner::TokenUserResponse,
            rest::commissioner::AssignOrderRequest,
            rest::commissioner::AssignOrderResponse,
            rest::commissioner::OrderResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Chats", description = "Chat listings"),
        (name = "Messages", description = "Reading and sending chat messages"),
        (name = "Commissioners", description = "Commissioners acting for clients"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
