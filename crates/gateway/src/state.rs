//! Shared application state for the gateway

use std::sync::Arc;

use sqlx::SqlitePool;

use agora_auth::TokenManager;
use agora_chats::ChatService;
use agora_clients::CommissionerService;
use agora_config::{AppConfig, AuthConfig};

use crate::realtime::ChatHub;

/// Everything a handler needs. Built once at startup from the pool and configuration.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    auth: AuthConfig,
    tokens: TokenManager,
    hub: ChatHub,
    chat_service: ChatService,
    commissioner_service: CommissionerService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        let tokens = TokenManager::from_config(&config.auth);
        let hub = ChatHub::new(config.realtime.channel_capacity);
        let chat_service = ChatService::new(pool.clone(), Arc::new(hub.clone()));
        let commissioner_service = CommissionerService::new(pool.clone(), tokens.clone());

        Self {
            pool,
            auth: config.auth.clone(),
            tokens,
            hub,
            chat_service,
            commissioner_service,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn hub(&self) -> &ChatHub {
        &self.hub
    }

    pub fn chat_service(&self) -> &ChatService {
        &self.chat_service
    }

    pub fn commissioner_service(&self) -> &CommissionerService {
        &self.commissioner_service
    }
}
