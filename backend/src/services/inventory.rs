//! Raw-material inventory service: the stock-transaction ledger
//!
//! Maintains the invariant that a material's cached `current_stock` always
//! equals its initial quantity plus the signed sum of its append-only
//! transaction history. The ledger append and the stock adjustment are one
//! database transaction: either both are durably applied or neither is.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    sort_newest_first, Material, StockStatus, StockTransaction, TransactionType, Unit,
};
use shared::validation::{validate_code, validate_initial_quantity, validate_min_stock,
    validate_transaction_quantity};

/// Inventory service for materials and their stock-transaction ledger
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub wood_code: String,
    pub wood_type: String,
    /// Declared initial quantity; seeds the current stock level
    pub quantity: Decimal,
    pub min_stock: Decimal,
    pub unit: Unit,
}

/// Input for updating a material's mutable fields
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub wood_code: Option<String>,
    pub wood_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub current_stock: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub unit: Option<Unit>,
}

/// Input for recording a stock transaction
#[derive(Debug, Deserialize)]
pub struct RecordTransactionInput {
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub reference_number: Option<String>,
    pub note: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Stock health view for a material
#[derive(Debug, Clone, Serialize)]
pub struct StockStatusView {
    pub material_id: Uuid,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub status: StockStatus,
}

/// Row for material queries (enums stored as text)
#[derive(Debug, FromRow)]
struct MaterialRow {
    id: Uuid,
    wood_code: String,
    wood_type: String,
    quantity: Decimal,
    current_stock: Decimal,
    min_stock: Decimal,
    unit: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MaterialRow {
    fn into_model(self) -> AppResult<Material> {
        let unit = self
            .unit
            .parse::<Unit>()
            .map_err(AppError::Internal)?;
        Ok(Material {
            id: self.id,
            wood_code: self.wood_code,
            wood_type: self.wood_type,
            quantity: self.quantity,
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            unit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row for transaction queries
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    material_id: Uuid,
    transaction_type: String,
    quantity: Decimal,
    reference_number: Option<String>,
    note: Option<String>,
    transaction_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_model(self) -> AppResult<StockTransaction> {
        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .map_err(AppError::Internal)?;
        Ok(StockTransaction {
            id: self.id,
            material_id: self.material_id,
            transaction_type,
            quantity: self.quantity,
            reference_number: self.reference_number,
            note: self.note,
            transaction_date: self.transaction_date,
            created_at: self.created_at,
        })
    }
}

const MATERIAL_COLUMNS: &str =
    "id, wood_code, wood_type, quantity, current_stock, min_stock, unit, created_at, updated_at";

const TRANSACTION_COLUMNS: &str =
    "id, material_id, transaction_type, quantity, reference_number, note, transaction_date, created_at";

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a material; the initial quantity seeds the current stock level
    pub async fn create_material(&self, input: CreateMaterialInput) -> AppResult<Material> {
        validate_code(&input.wood_code).map_err(|msg| AppError::Validation {
            field: "wood_code".to_string(),
            message: msg.to_string(),
            message_vi: "Mã gỗ không được để trống".to_string(),
        })?;
        validate_initial_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_vi: "Số lượng ban đầu không được âm".to_string(),
        })?;
        validate_min_stock(input.min_stock).map_err(|msg| AppError::Validation {
            field: "min_stock".to_string(),
            message: msg.to_string(),
            message_vi: "Mức tồn kho tối thiểu không được âm".to_string(),
        })?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE wood_code = $1",
        )
        .bind(&input.wood_code)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("wood_code".to_string()));
        }

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            INSERT INTO materials (wood_code, wood_type, quantity, current_stock, min_stock, unit)
            VALUES ($1, $2, $3, $3, $4, $5)
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(&input.wood_code)
        .bind(&input.wood_type)
        .bind(input.quantity)
        .bind(input.min_stock)
        .bind(input.unit.as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List all materials, newest first
    pub async fn list_materials(&self) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials ORDER BY created_at DESC",
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MaterialRow::into_model).collect()
    }

    /// Get a single material
    pub async fn get_material(&self, material_id: Uuid) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1",
        ))
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        row.into_model()
    }

    /// Update a material's descriptive fields and thresholds
    pub async fn update_material(
        &self,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> AppResult<Material> {
        let existing = self.get_material(material_id).await?;

        let wood_code = input.wood_code.unwrap_or(existing.wood_code);
        let wood_type = input.wood_type.unwrap_or(existing.wood_type);
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let current_stock = input.current_stock.unwrap_or(existing.current_stock);
        let min_stock = input.min_stock.unwrap_or(existing.min_stock);
        let unit = input.unit.unwrap_or(existing.unit);

        validate_code(&wood_code).map_err(|msg| AppError::Validation {
            field: "wood_code".to_string(),
            message: msg.to_string(),
            message_vi: "Mã gỗ không được để trống".to_string(),
        })?;
        validate_min_stock(min_stock).map_err(|msg| AppError::Validation {
            field: "min_stock".to_string(),
            message: msg.to_string(),
            message_vi: "Mức tồn kho tối thiểu không được âm".to_string(),
        })?;
        if current_stock < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "current_stock".to_string(),
                message: "Current stock cannot be negative".to_string(),
                message_vi: "Tồn kho không được âm".to_string(),
            });
        }

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            UPDATE materials
            SET wood_code = $1, wood_type = $2, quantity = $3, current_stock = $4,
                min_stock = $5, unit = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(&wood_code)
        .bind(&wood_type)
        .bind(quantity)
        .bind(current_stock)
        .bind(min_stock)
        .bind(unit.as_str())
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a material; its transaction history goes with it (cascade)
    pub async fn delete_material(&self, material_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(material_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Record a stock transaction and adjust the cached running total.
    ///
    /// The transaction insert and the stock update run inside one database
    /// transaction; readers never observe a partially-applied state. The
    /// material row is locked for the duration so two concurrent calls
    /// serialize and neither adjustment is lost.
    pub async fn record_transaction(
        &self,
        material_id: Uuid,
        input: RecordTransactionInput,
    ) -> AppResult<StockTransaction> {
        validate_transaction_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_vi: "Số lượng phải là số dương".to_string(),
        })?;

        let transaction_date = input.transaction_date.unwrap_or_else(Utc::now);
        let delta = input.transaction_type.signed(input.quantity);

        let mut tx = self.db.begin().await?;

        let current_stock = sqlx::query_scalar::<_, Decimal>(
            "SELECT current_stock FROM materials WHERE id = $1 FOR UPDATE",
        )
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        // Exports may not drive the stock level negative
        if current_stock + delta < Decimal::ZERO {
            return Err(AppError::InsufficientStock(format!(
                "Cannot export {} (current stock {})",
                input.quantity, current_stock
            )));
        }

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO stock_transactions
                (material_id, transaction_type, quantity, reference_number, note, transaction_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TRANSACTION_COLUMNS}
            "#,
        ))
        .bind(material_id)
        .bind(input.transaction_type.as_str())
        .bind(input.quantity)
        .bind(&input.reference_number)
        .bind(&input.note)
        .bind(transaction_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE materials SET current_stock = current_stock + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(delta)
        .bind(material_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_model()
    }

    /// Get the transaction history for a material, newest first
    pub async fn list_transactions(&self, material_id: Uuid) -> AppResult<Vec<StockTransaction>> {
        // Validate material exists
        let material_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM materials WHERE id = $1)",
        )
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        if !material_exists {
            return Err(AppError::NotFound("Material".to_string()));
        }

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM stock_transactions
            WHERE material_id = $1
            ORDER BY transaction_date DESC, created_at DESC
            "#,
        ))
        .bind(material_id)
        .fetch_all(&self.db)
        .await?;

        let mut transactions = rows
            .into_iter()
            .map(TransactionRow::into_model)
            .collect::<AppResult<Vec<_>>>()?;
        sort_newest_first(&mut transactions);

        Ok(transactions)
    }

    /// Classify a material's stock health from its stored numeric fields
    pub async fn get_stock_status(&self, material_id: Uuid) -> AppResult<StockStatusView> {
        let material = self.get_material(material_id).await?;

        Ok(StockStatusView {
            material_id: material.id,
            current_stock: material.current_stock,
            min_stock: material.min_stock,
            status: material.stock_status(),
        })
    }
}
