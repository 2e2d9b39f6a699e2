//! Chat service for listing chats and exchanging messages.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use agora_auth::{Principal, Role};
use agora_database::{
    Chat, ChatMessage, ChatRepository, ChatSummary, ClientRepository, CommissionerRepository,
    CreateMessageRequest, MessageRepository, PartyContact,
};
use sqlx::SqlitePool;

use crate::types::{ChatError, ChatResult, MessageEvent, MessagePublisher};
use crate::utils::permissions::{ChatParticipants, ParticipantSide, PermissionChecker};
use crate::utils::validation::validate_message_content;

/// A chat as presented in listings. Which contacts are filled depends on who asks:
/// clients and commissioners see the employee, employees see the client, admins see both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOverview {
    pub chat: Chat,
    pub service_item_name: Option<String>,
    pub client: Option<PartyContact>,
    pub employee: Option<PartyContact>,
}

impl ChatOverview {
    fn for_client(summary: &ChatSummary) -> Self {
        Self {
            chat: summary.chat(),
            service_item_name: summary.service_item_name.clone(),
            client: None,
            employee: Some(summary.employee()),
        }
    }

    fn for_employee(summary: &ChatSummary) -> Self {
        Self {
            chat: summary.chat(),
            service_item_name: summary.service_item_name.clone(),
            client: Some(summary.client()),
            employee: None,
        }
    }

    fn full(summary: &ChatSummary) -> Self {
        Self {
            chat: summary.chat(),
            service_item_name: summary.service_item_name.clone(),
            client: Some(summary.client()),
            employee: Some(summary.employee()),
        }
    }
}

/// Service for chat operations
#[derive(Clone)]
pub struct ChatService {
    chats: ChatRepository,
    messages: MessageRepository,
    clients: ClientRepository,
    commissioners: CommissionerRepository,
    publisher: Arc<dyn MessagePublisher>,
}

impl ChatService {
    pub fn new(pool: SqlitePool, publisher: Arc<dyn MessagePublisher>) -> Self {
        Self {
            chats: ChatRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            commissioners: CommissionerRepository::new(pool),
            publisher,
        }
    }

    /// Chats visible to the caller, shaped for the caller's role.
    pub async fn list_for_principal(&self, principal: &Principal) -> ChatResult<Vec<ChatOverview>> {
        let overviews = match principal.role {
            Role::Client => self
                .chats
                .list_for_client(principal.id)
                .await?
                .iter()
                .map(ChatOverview::for_client)
                .collect(),
            Role::Employee => self
                .chats
                .list_for_employee(principal.id)
                .await?
                .iter()
                .map(ChatOverview::for_employee)
                .collect(),
            Role::Commissioner => {
                let commissioner = self
                    .commissioners
                    .find_by_id(principal.id)
                    .await?
                    .ok_or_else(|| ChatError::access_denied("Commissioner account no longer exists"))?;
                self.chats
                    .list_for_client(commissioner.client_id)
                    .await?
                    .iter()
                    .map(ChatOverview::for_client)
                    .collect()
            }
            Role::Admin => self
                .chats
                .list_all()
                .await?
                .iter()
                .map(ChatOverview::full)
                .collect(),
        };

        Ok(overviews)
    }

    pub async fn list_all(&self, principal: &Principal) -> ChatResult<Vec<ChatOverview>> {
        PermissionChecker::can_list_all_chats(principal)?;

        let chats = self.chats.list_all().await?;
        Ok(chats.iter().map(ChatOverview::full).collect())
    }

    /// Chats of `user_id`. Admins match either side; everyone else only their own.
    pub async fn list_by_user(&self, principal: &Principal, user_id: i64) -> ChatResult<Vec<Chat>> {
        let chats = match PermissionChecker::can_list_chats_of(principal, user_id)? {
            ParticipantSide::Either => self.chats.list_by_participant(user_id).await?,
            ParticipantSide::Client => self
                .chats
                .list_for_client(user_id)
                .await?
                .iter()
                .map(ChatSummary::chat)
                .collect(),
            ParticipantSide::Employee => self
                .chats
                .list_for_employee(user_id)
                .await?
                .iter()
                .map(ChatSummary::chat)
                .collect(),
        };

        Ok(chats)
    }

    /// Messages of a chat, oldest first.
    pub async fn messages(&self, principal: &Principal, chat_id: i64) -> ChatResult<Vec<ChatMessage>> {
        self.ensure_can_read(principal, chat_id).await?;

        let messages = self.messages.list_for_chat(chat_id).await?;
        debug!(chat_id, count = messages.len(), "loaded chat messages");
        Ok(messages)
    }

    /// Resolves the chat and applies the read guard. Used by the websocket upgrade too.
    pub async fn ensure_can_read(&self, principal: &Principal, chat_id: i64) -> ChatResult<Chat> {
        let chat = self.load_chat(chat_id).await?;
        let participants = self.participants(&chat, principal).await?;
        PermissionChecker::can_read_chat(principal, &participants)?;
        Ok(chat)
    }

    pub async fn send_message(
        &self,
        principal: &Principal,
        chat_id: i64,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        let chat = self.load_chat(chat_id).await?;
        validate_message_content(content)?;
        let participants = self.participants(&chat, principal).await?;
        PermissionChecker::can_send_message(principal, &participants)?;

        let message = self
            .messages
            .create(&CreateMessageRequest {
                chat_id,
                sender: principal.id,
                sender_role: principal.role.as_str().to_string(),
                content: content.to_string(),
            })
            .await?;

        self.publisher.publish(MessageEvent::from(&message));
        info!(chat_id, sender = principal.id, message_id = message.id, "message sent");

        Ok(message)
    }

    async fn load_chat(&self, chat_id: i64) -> ChatResult<Chat> {
        self.chats
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| ChatError::chat_not_found(chat_id))
    }

    async fn participants(&self, chat: &Chat, principal: &Principal) -> ChatResult<ChatParticipants> {
        // The commissioner set only matters when a commissioner is asking.
        let commissioner_ids = if principal.role == Role::Commissioner {
            self.clients.commissioner_ids(chat.client_id).await?
        } else {
            Vec::new()
        };
        Ok(ChatParticipants::for_chat(chat, commissioner_ids))
    }
}
