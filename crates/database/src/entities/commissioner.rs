//! Commissioner entity definitions

use serde::{Deserialize, Serialize};

/// Agent acting on behalf of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Commissioner {
    pub id: i64,
    pub name: String,
    pub identity_number: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub service_item_id: Option<i64>,
    pub client_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateCommissionerRequest {
    pub name: String,
    pub identity_number: String,
    pub phone_number: String,
    pub password_hash: String,
    pub service_item_id: Option<i64>,
    pub client_id: i64,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCommissionerRequest {
    pub name: Option<String>,
    pub identity_number: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
    pub service_item_id: Option<i64>,
}

impl UpdateCommissionerRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.identity_number.is_none()
            && self.phone_number.is_none()
            && self.password_hash.is_none()
            && self.service_item_id.is_none()
    }
}
