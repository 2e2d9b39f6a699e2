//! Event types for real-time chat updates.

use serde::{Deserialize, Serialize};

use agora_database::ChatMessage;

/// Payload pushed to chat subscribers whenever a message is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub chat_id: i64,
    pub content: String,
    pub sender: i64,
    pub created_at: String,
}

impl MessageEvent {
    pub const NAME: &'static str = "receive-message";
}

impl From<&ChatMessage> for MessageEvent {
    fn from(message: &ChatMessage) -> Self {
        Self {
            chat_id: message.chat_id,
            content: message.content.clone(),
            sender: message.sender,
            created_at: message.created_at.clone(),
        }
    }
}

/// Fire-and-forget delivery of chat events. Implementations must not block.
pub trait MessagePublisher: Send + Sync {
    fn publish(&self, event: MessageEvent);
}
