use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceItem {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}
