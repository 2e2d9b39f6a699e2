//! Repository implementations for database access

pub mod chat_repository;
pub mod client_repository;
pub mod commissioner_repository;
pub mod employee_repository;
pub mod message_repository;
pub mod order_repository;
pub mod service_item_repository;

pub use chat_repository::ChatRepository;
pub use client_repository::ClientRepository;
pub use commissioner_repository::CommissionerRepository;
pub use employee_repository::EmployeeRepository;
pub use message_repository::MessageRepository;
pub use order_repository::OrderRepository;
pub use service_item_repository::ServiceItemRepository;

#[cfg(test)]
pub(crate) mod fixtures {
    use sqlx::SqlitePool;

    use crate::entities::{CreateChatRequest, CreateClientRequest, CreateEmployeeRequest};
    use crate::repos::{ChatRepository, ClientRepository, EmployeeRepository};

    /// Inserts one client, one employee and a chat between them.
    pub async fn seed_chat(pool: &SqlitePool) -> (i64, i64, i64) {
        let client = ClientRepository::new(pool.clone())
            .create(&CreateClientRequest {
                name: "Client One".to_string(),
                email: "client1@example.com".to_string(),
            })
            .await
            .unwrap();
        let employee = EmployeeRepository::new(pool.clone())
            .create(&CreateEmployeeRequest {
                name: "Employee One".to_string(),
                email: "employee1@example.com".to_string(),
            })
            .await
            .unwrap();
        let chat = ChatRepository::new(pool.clone())
            .create(&CreateChatRequest {
                client_id: client.id,
                employee_id: employee.id,
                service_item_id: None,
            })
            .await
            .unwrap();

        (client.id, employee.id, chat.id)
    }
}
