//! Repository for orders and their commissioner assignments.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{CreateOrderRequest, Order, OrderWithCommissioners};
use crate::types::{now_timestamp, DatabaseResult};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> DatabaseResult<Order> {
        let now = now_timestamp();

        let id = sqlx::query(
            "INSERT INTO orders (client_id, service_item_id, status, created_at) VALUES (?, ?, 'pending', ?)",
        )
        .bind(request.client_id)
        .bind(request.service_item_id)
        .bind(&now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(order_id = id, client_id = request.client_id, "created order");

        Ok(Order {
            id,
            client_id: request.client_id,
            service_item_id: request.service_item_id,
            status: "pending".to_string(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, client_id, service_item_id, status, created_at FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Link a commissioner to an order. Linking twice is a no-op.
    pub async fn attach_commissioner(
        &self,
        order_id: i64,
        commissioner_id: i64,
    ) -> DatabaseResult<()> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO order_commissioners (order_id, commissioner_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(order_id)
        .bind(commissioner_id)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(order_id, commissioner_id, "assigned commissioner to order");
        }
        Ok(())
    }

    pub async fn commissioner_ids(&self, order_id: i64) -> DatabaseResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT commissioner_id FROM order_commissioners WHERE order_id = ? ORDER BY commissioner_id ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// The order joined with its commissioner ids, `None` if the order does not exist.
    pub async fn with_commissioners(
        &self,
        order_id: i64,
    ) -> DatabaseResult<Option<OrderWithCommissioners>> {
        let Some(order) = self.find_by_id(order_id).await? else {
            return Ok(None);
        };
        let commissioner_ids = self.commissioner_ids(order_id).await?;

        Ok(Some(OrderWithCommissioners {
            order,
            commissioner_ids,
        }))
    }
}
