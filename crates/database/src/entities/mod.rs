//! Domain entities for the database layer
//!
//! Row shapes returned by the repositories together with their insert/update requests.

pub mod chat;
pub mod client;
pub mod commissioner;
pub mod employee;
pub mod message;
pub mod order;
pub mod service_item;

// Re-export all entity types
pub use chat::{Chat, ChatSummary, CreateChatRequest, PartyContact};
pub use client::{Client, CreateClientRequest};
pub use commissioner::{Commissioner, CreateCommissionerRequest, UpdateCommissionerRequest};
pub use employee::{CreateEmployeeRequest, Employee};
pub use message::{ChatMessage, CreateMessageRequest};
pub use order::{CreateOrderRequest, Order, OrderWithCommissioners};
pub use service_item::ServiceItem;
