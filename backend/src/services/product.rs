//! Product catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Product, ProductionStatus};
use shared::validation::{validate_code, validate_price};

/// Product service for the workshop catalog
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub code: String,
    pub name: String,
    pub wood_type: String,
    pub dimensions: String,
    pub price: Decimal,
    pub production_status: ProductionStatus,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub code: Option<String>,
    pub name: Option<String>,
    pub wood_type: Option<String>,
    pub dimensions: Option<String>,
    pub price: Option<Decimal>,
    pub production_status: Option<ProductionStatus>,
}

/// Row for product queries (status stored as text)
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    code: String,
    name: String,
    wood_type: String,
    dimensions: String,
    price: Decimal,
    production_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_model(self) -> AppResult<Product> {
        let production_status = self
            .production_status
            .parse::<ProductionStatus>()
            .map_err(AppError::Internal)?;
        Ok(Product {
            id: self.id,
            code: self.code,
            name: self.name,
            wood_type: self.wood_type,
            dimensions: self.dimensions,
            price: self.price,
            production_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str =
    "id, code, name, wood_type, dimensions, price, production_status, created_at, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn validate(code: &str, price: Decimal) -> AppResult<()> {
        validate_code(code).map_err(|msg| AppError::Validation {
            field: "code".to_string(),
            message: msg.to_string(),
            message_vi: "Mã sản phẩm không được để trống".to_string(),
        })?;
        validate_price(price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
            message_vi: "Giá không được âm".to_string(),
        })?;
        Ok(())
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        Self::validate(&input.code, input.price)?;

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE code = $1")
                .bind(&input.code)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (code, name, wood_type, dimensions, price, production_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.wood_type)
        .bind(&input.dimensions)
        .bind(input.price)
        .bind(input.production_status.as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List all products, ordered by name
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name",
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ProductRow::into_model).collect()
    }

    /// Get a single product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1",
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        row.into_model()
    }

    /// Update a product
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;

        let code = input.code.unwrap_or(existing.code);
        let name = input.name.unwrap_or(existing.name);
        let wood_type = input.wood_type.unwrap_or(existing.wood_type);
        let dimensions = input.dimensions.unwrap_or(existing.dimensions);
        let price = input.price.unwrap_or(existing.price);
        let production_status = input.production_status.unwrap_or(existing.production_status);

        Self::validate(&code, price)?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET code = $1, name = $2, wood_type = $3, dimensions = $4, price = $5,
                production_status = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(&code)
        .bind(&name)
        .bind(&wood_type)
        .bind(&dimensions)
        .bind(price)
        .bind(production_status.as_str())
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a product
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }
}
