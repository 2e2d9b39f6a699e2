//! # Agora Chats Crate
//!
//! Chat listing and messaging for clients, employees, commissioners and admins.
//!
//! - **Services**: `ChatService`, the entry point used by the gateway
//! - **Types**: errors and the realtime event payload
//! - **Utils**: the access guard and input validation
//!
//! Realtime delivery is abstracted behind [`MessagePublisher`] so that the
//! service stays independent of the transport.

pub mod services;
pub mod types;
pub mod utils;

pub use services::{ChatOverview, ChatService};
pub use types::{ChatError, ChatResult, MessageEvent, MessagePublisher};
pub use utils::permissions::{ChatParticipants, ParticipantSide, PermissionChecker};
