//! Chat and message REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use agora_auth::Principal;
use agora_chats::ChatOverview;
use agora_database::{Chat, ChatMessage, PartyContact};

use crate::error::{GatewayError, GatewayResult};
use crate::rest::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: i64,
    pub client_id: i64,
    pub employee_id: i64,
    pub service_item_id: Option<i64>,
    pub created_at: String,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            client_id: chat.client_id,
            employee_id: chat.employee_id,
            service_item_id: chat.service_item_id,
            created_at: chat.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub name: String,
    pub email: String,
}

impl From<PartyContact> for ContactResponse {
    fn from(contact: PartyContact) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
        }
    }
}

/// A chat in a listing, with the counterpart's contact details.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatListItem {
    #[serde(flatten)]
    pub chat: ChatResponse,
    pub service_item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ContactResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<ContactResponse>,
}

impl From<ChatOverview> for ChatListItem {
    fn from(overview: ChatOverview) -> Self {
        Self {
            chat: overview.chat.into(),
            service_item_name: overview.service_item_name,
            client: overview.client.map(Into::into),
            employee: overview.employee.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatsResponse {
    pub chats: Vec<ChatListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AllChatsResponse {
    pub success: bool,
    pub data: Vec<ChatListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserChatsResponse {
    pub success: bool,
    pub data: Vec<ChatResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub chat_id: i64,
    pub sender: i64,
    pub sender_role: String,
    pub content: String,
    pub created_at: String,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            sender: message.sender,
            sender_role: message.sender_role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SentMessageResponse {
    pub message: MessageResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub content: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/chats",
    tag = "Chats",
    responses(
        (status = 200, description = "Chats visible to the caller", body = ChatsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> GatewayResult<Json<ChatsResponse>> {
    let chats = state.chat_service().list_for_principal(&principal).await?;

    Ok(Json(ChatsResponse {
        chats: chats.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/chats/all",
    tag = "Chats",
    responses(
        (status = 200, description = "Every chat", body = AllChatsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    )
)]
pub async fn list_all_chats(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> GatewayResult<Json<AllChatsResponse>> {
    let chats = state.chat_service().list_all(&principal).await?;

    Ok(Json(AllChatsResponse {
        success: true,
        data: chats.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/chats/user/{user_id}",
    tag = "Chats",
    params(("user_id" = i64, Path, description = "Client or employee id")),
    responses(
        (status = 200, description = "Chats the user takes part in", body = UserChatsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin and not the user", body = ErrorResponse)
    )
)]
pub async fn list_chats_by_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, GatewayError>,
) -> GatewayResult<Json<UserChatsResponse>> {
    let chats = state.chat_service().list_by_user(&principal, user_id).await?;

    Ok(Json(UserChatsResponse {
        success: true,
        data: chats.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/chats/{chat_id}/messages",
    tag = "Messages",
    params(("chat_id" = i64, Path, description = "Chat id")),
    responses(
        (status = 200, description = "Messages, oldest first", body = MessagesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(chat_id), _): WithRejection<Path<i64>, GatewayError>,
) -> GatewayResult<Json<MessagesResponse>> {
    let messages = state.chat_service().messages(&principal, chat_id).await?;

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/chats/{chat_id}/messages",
    tag = "Messages",
    params(("chat_id" = i64, Path, description = "Chat id")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message stored and broadcast", body = SentMessageResponse),
        (status = 400, description = "Blank content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not allowed to post", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(chat_id), _): WithRejection<Path<i64>, GatewayError>,
    WithRejection(Json(body), _): WithRejection<Json<SendMessageRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<SentMessageResponse>)> {
    let message = state
        .chat_service()
        .send_message(&principal, chat_id, &body.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SentMessageResponse {
            message: message.into(),
        }),
    ))
}
