use crate::types::{ChatError, ChatResult};

/// Rejects message bodies that are empty once surrounding whitespace is removed.
pub fn validate_message_content(content: &str) -> ChatResult<()> {
    if content.trim().is_empty() {
        return Err(ChatError::validation("Message content cannot be empty"));
    }
    Ok(())
}
