//! Order entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub service_item_id: Option<i64>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: i64,
    pub service_item_id: Option<i64>,
}

/// Order together with the ids of every commissioner linked to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithCommissioners {
    #[serde(flatten)]
    pub order: Order,
    pub commissioner_ids: Vec<i64>,
}
