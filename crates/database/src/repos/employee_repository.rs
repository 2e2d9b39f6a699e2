//! Repository for employee data access operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{CreateEmployeeRequest, Employee};
use crate::types::{now_timestamp, DatabaseResult};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateEmployeeRequest) -> DatabaseResult<Employee> {
        let now = now_timestamp();

        let id = sqlx::query("INSERT INTO employees (name, email, created_at) VALUES (?, ?, ?)")
            .bind(&request.name)
            .bind(&request.email)
            .bind(&now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        info!(employee_id = id, "created employee");

        Ok(Employee {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, created_at FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}
