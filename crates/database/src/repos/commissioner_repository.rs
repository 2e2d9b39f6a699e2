//! Repository for commissioner data access operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{Commissioner, CreateCommissionerRequest, UpdateCommissionerRequest};
use crate::types::{now_timestamp, DatabaseResult};

const COMMISSIONER_COLUMNS: &str = "id, name, identity_number, phone_number, password_hash, service_item_id, client_id, created_at, updated_at";

/// Repository for commissioner database operations
#[derive(Clone)]
pub struct CommissionerRepository {
    pool: SqlitePool,
}

impl CommissionerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a commissioner owned by `request.client_id`
    pub async fn create(
        &self,
        request: &CreateCommissionerRequest,
    ) -> DatabaseResult<Commissioner> {
        let now = now_timestamp();

        let id = sqlx::query(
            r#"
            INSERT INTO commissioners
                (name, identity_number, phone_number, password_hash, service_item_id, client_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.identity_number)
        .bind(&request.phone_number)
        .bind(&request.password_hash)
        .bind(request.service_item_id)
        .bind(request.client_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(commissioner_id = id, client_id = request.client_id, "created commissioner");

        Ok(Commissioner {
            id,
            name: request.name.clone(),
            identity_number: request.identity_number.clone(),
            phone_number: request.phone_number.clone(),
            password_hash: request.password_hash.clone(),
            service_item_id: request.service_item_id,
            client_id: request.client_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Commissioner>> {
        let query = format!("SELECT {COMMISSIONER_COLUMNS} FROM commissioners WHERE id = ?");
        let commissioner = sqlx::query_as::<_, Commissioner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(commissioner)
    }

    /// Lookup used by login; phone numbers are unique.
    pub async fn find_by_phone(&self, phone_number: &str) -> DatabaseResult<Option<Commissioner>> {
        let query =
            format!("SELECT {COMMISSIONER_COLUMNS} FROM commissioners WHERE phone_number = ?");
        let commissioner = sqlx::query_as::<_, Commissioner>(&query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(commissioner)
    }

    pub async fn list_for_client(&self, client_id: i64) -> DatabaseResult<Vec<Commissioner>> {
        let query = format!(
            "SELECT {COMMISSIONER_COLUMNS} FROM commissioners WHERE client_id = ? ORDER BY id ASC"
        );
        let commissioners = sqlx::query_as::<_, Commissioner>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(commissioners)
    }

    /// Apply a partial update and return the stored row, `None` if it does not exist.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateCommissionerRequest,
    ) -> DatabaseResult<Option<Commissioner>> {
        let result = sqlx::query(
            r#"
            UPDATE commissioners SET
                name = COALESCE(?, name),
                identity_number = COALESCE(?, identity_number),
                phone_number = COALESCE(?, phone_number),
                password_hash = COALESCE(?, password_hash),
                service_item_id = COALESCE(?, service_item_id),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&request.name)
        .bind(&request.identity_number)
        .bind(&request.phone_number)
        .bind(&request.password_hash)
        .bind(request.service_item_id)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(commissioner_id = id, "updated commissioner");
        self.find_by_id(id).await
    }

    /// Returns `true` when a row was removed.
    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM commissioners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(commissioner_id = id, "deleted commissioner");
        }
        Ok(deleted)
    }
}
