//! Shared types for the chat system.

pub mod errors;
pub mod events;

pub use errors::{ChatError, ChatResult};
pub use events::{MessageEvent, MessagePublisher};
