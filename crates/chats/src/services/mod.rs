//! Business logic services for chat operations.

pub mod chat_service;

pub use chat_service::{ChatOverview, ChatService};
