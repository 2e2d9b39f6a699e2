//! Message entity definitions

use serde::{Deserialize, Serialize};

/// A chat message. Rows are never updated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub chat_id: i64,
    pub sender: i64,
    pub sender_role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub chat_id: i64,
    pub sender: i64,
    pub sender_role: String,
    pub content: String,
}
