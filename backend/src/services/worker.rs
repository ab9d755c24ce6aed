//! Workshop worker service
//!
//! The source kept this screen in browser-local storage; here it shares the
//! same storage collaborator as every other entity.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Shift, Worker};
use shared::validation::validate_completed_products;

/// Worker service for workshop personnel records
#[derive(Clone)]
pub struct WorkerService {
    db: PgPool,
}

/// Input for creating a worker
#[derive(Debug, Deserialize)]
pub struct CreateWorkerInput {
    pub name: String,
    pub position: String,
    pub shift: Shift,
    pub completed_products: Option<i32>,
}

/// Input for updating a worker
#[derive(Debug, Deserialize)]
pub struct UpdateWorkerInput {
    pub name: Option<String>,
    pub position: Option<String>,
    pub shift: Option<Shift>,
    pub completed_products: Option<i32>,
}

/// Row for worker queries (shift stored as text)
#[derive(Debug, FromRow)]
struct WorkerRow {
    id: Uuid,
    name: String,
    position: String,
    shift: String,
    completed_products: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkerRow {
    fn into_model(self) -> AppResult<Worker> {
        let shift = self.shift.parse::<Shift>().map_err(AppError::Internal)?;
        Ok(Worker {
            id: self.id,
            name: self.name,
            position: self.position,
            shift,
            completed_products: self.completed_products,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const WORKER_COLUMNS: &str =
    "id, name, position, shift, completed_products, created_at, updated_at";

impl WorkerService {
    /// Create a new WorkerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn validate(name: &str, completed_products: i32) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name cannot be empty".to_string(),
                message_vi: "Tên không được để trống".to_string(),
            });
        }
        validate_completed_products(completed_products).map_err(|msg| AppError::Validation {
            field: "completed_products".to_string(),
            message: msg.to_string(),
            message_vi: "Số sản phẩm hoàn thành không được âm".to_string(),
        })?;
        Ok(())
    }

    /// Create a worker
    pub async fn create_worker(&self, input: CreateWorkerInput) -> AppResult<Worker> {
        let completed_products = input.completed_products.unwrap_or(0);
        Self::validate(&input.name, completed_products)?;

        let row = sqlx::query_as::<_, WorkerRow>(&format!(
            r#"
            INSERT INTO workers (name, position, shift, completed_products)
            VALUES ($1, $2, $3, $4)
            RETURNING {WORKER_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.position)
        .bind(input.shift.as_str())
        .bind(completed_products)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List all workers, newest first
    pub async fn list_workers(&self) -> AppResult<Vec<Worker>> {
        let rows = sqlx::query_as::<_, WorkerRow>(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers ORDER BY created_at DESC",
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(WorkerRow::into_model).collect()
    }

    /// Get a single worker
    pub async fn get_worker(&self, worker_id: Uuid) -> AppResult<Worker> {
        let row = sqlx::query_as::<_, WorkerRow>(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE id = $1",
        ))
        .bind(worker_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Worker".to_string()))?;

        row.into_model()
    }

    /// Update a worker
    pub async fn update_worker(
        &self,
        worker_id: Uuid,
        input: UpdateWorkerInput,
    ) -> AppResult<Worker> {
        let existing = self.get_worker(worker_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let position = input.position.unwrap_or(existing.position);
        let shift = input.shift.unwrap_or(existing.shift);
        let completed_products = input
            .completed_products
            .unwrap_or(existing.completed_products);

        Self::validate(&name, completed_products)?;

        let row = sqlx::query_as::<_, WorkerRow>(&format!(
            r#"
            UPDATE workers
            SET name = $1, position = $2, shift = $3, completed_products = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {WORKER_COLUMNS}
            "#,
        ))
        .bind(&name)
        .bind(&position)
        .bind(shift.as_str())
        .bind(completed_products)
        .bind(worker_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a worker
    pub async fn delete_worker(&self, worker_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(worker_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Worker".to_string()));
        }

        Ok(())
    }
}
