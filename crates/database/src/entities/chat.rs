//! Chat entity definitions

use serde::{Deserialize, Serialize};

/// A conversation bound to exactly one client and one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: i64,
    pub client_id: i64,
    pub employee_id: i64,
    pub service_item_id: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatRequest {
    pub client_id: i64,
    pub employee_id: i64,
    pub service_item_id: Option<i64>,
}

/// Name and email of one side of a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyContact {
    pub name: String,
    pub email: String,
}

/// Chat row joined with its service item, client and employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatSummary {
    pub id: i64,
    pub client_id: i64,
    pub employee_id: i64,
    pub service_item_id: Option<i64>,
    pub created_at: String,
    pub service_item_name: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub employee_name: String,
    pub employee_email: String,
}

impl ChatSummary {
    pub fn client(&self) -> PartyContact {
        PartyContact {
            name: self.client_name.clone(),
            email: self.client_email.clone(),
        }
    }

    pub fn employee(&self) -> PartyContact {
        PartyContact {
            name: self.employee_name.clone(),
            email: self.employee_email.clone(),
        }
    }

    pub fn chat(&self) -> Chat {
        Chat {
            id: self.id,
            client_id: self.client_id,
            employee_id: self.employee_id,
            service_item_id: self.service_item_id,
            created_at: self.created_at.clone(),
        }
    }
}
