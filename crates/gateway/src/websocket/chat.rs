//! Chat WebSocket handlers

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    Extension,
};
use axum_extra::extract::WithRejection;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use agora_auth::Principal;
use agora_chats::MessageEvent;

use crate::error::{GatewayError, GatewayResult};
use crate::state::AppState;

/// Frame sent to subscribers: the event name next to the payload fields.
#[derive(Debug, Serialize)]
pub struct ChatServerEvent<'a> {
    pub event: &'static str,
    #[serde(flatten)]
    pub payload: &'a MessageEvent,
}

impl<'a> ChatServerEvent<'a> {
    pub fn receive_message(payload: &'a MessageEvent) -> Self {
        Self {
            event: MessageEvent::NAME,
            payload,
        }
    }
}

/// Upgrade to a websocket streaming the chat's events. The read guard runs before the upgrade.
pub async fn chat_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(chat_id), _): WithRejection<Path<i64>, GatewayError>,
) -> GatewayResult<Response> {
    state.chat_service().ensure_can_read(&principal, chat_id).await?;

    let user_id = principal.id;
    Ok(ws.on_upgrade(move |socket| handle_chat_websocket(socket, state, chat_id, user_id)))
}

/// Subscribes only once the socket is live, so a failed handshake leaves no channel behind.
async fn handle_chat_websocket(socket: WebSocket, state: Arc<AppState>, chat_id: i64, user_id: i64) {
    let mut events = state.hub().subscribe(chat_id);
    debug!(chat_id, user_id, "chat subscriber connected");

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let Ok(text) = serde_json::to_string(&ChatServerEvent::receive_message(&event))
                    else {
                        continue;
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(chat_id, skipped, "chat subscriber lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Inbound frames are ignored; the loop only watches for the peer going away.
    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => {
            send_task.abort();
            // The receiver must be dropped before the channel can be pruned.
            let _ = send_task.await;
        }
    }

    state.hub().prune(chat_id);
    debug!(chat_id, "chat subscriber disconnected");
}
