//! In-process publish/subscribe hub keyed by chat id.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use agora_chats::{MessageEvent, MessagePublisher};
use agora_config::MAX_CHANNEL_CAPACITY;

#[derive(Clone)]
pub struct ChatHub {
    channels: Arc<RwLock<HashMap<i64, broadcast::Sender<MessageEvent>>>>,
    capacity: usize,
}

impl ChatHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.clamp(1, MAX_CHANNEL_CAPACITY),
        }
    }

    /// Subscribe to a chat's events, creating its channel on first use.
    pub fn subscribe(&self, chat_id: i64) -> broadcast::Receiver<MessageEvent> {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(chat_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drop the chat's channel once nobody listens to it anymore.
    pub fn prune(&self, chat_id: i64) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        if channels
            .get(&chat_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(&chat_id);
            debug!(chat_id, "removed idle chat channel");
        }
    }

    /// Whether a channel is currently allocated for the chat.
    pub fn has_channel(&self, chat_id: i64) -> bool {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels.contains_key(&chat_id)
    }

    pub fn subscriber_count(&self, chat_id: i64) -> usize {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels
            .get(&chat_id)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl MessagePublisher for ChatHub {
    fn publish(&self, event: MessageEvent) {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = channels.get(&event.chat_id) else {
            return;
        };

        let chat_id = event.chat_id;
        // Err only means every receiver is gone.
        if let Ok(delivered) = sender.send(event) {
            debug!(chat_id, delivered, "published chat event");
        }
    }
}
