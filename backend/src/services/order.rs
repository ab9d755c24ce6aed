//! Customer order service
//!
//! The order total is always derived server-side from the item lines
//! (quantity times the product price captured at write time); the order row
//! and its items are written in one database transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{order_total, Order, OrderItem, OrderStatus};
use shared::validation::{validate_code, validate_item_quantity};

/// Order service for customer orders and their item lines
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// One requested item line on an incoming order
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub order_number: String,
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<OrderItemInput>,
}

/// Input for updating an order; when `items` is present the item lines are
/// replaced wholesale, as the source screen does
#[derive(Debug, Deserialize)]
pub struct UpdateOrderInput {
    pub order_number: Option<String>,
    pub customer_name: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<OrderItemInput>>,
}

/// An order item joined with its product summary for display
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product_code: String,
    pub product_name: String,
}

/// An order with its item lines
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Row for order queries (status stored as text)
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    customer_name: String,
    delivery_date: NaiveDate,
    status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_model(self) -> AppResult<Order> {
        let status = self.status.parse::<OrderStatus>().map_err(AppError::Internal)?;
        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            customer_name: self.customer_name,
            delivery_date: self.delivery_date,
            status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row for item queries joined to the product summary
#[derive(Debug, FromRow)]
struct ItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    created_at: DateTime<Utc>,
    product_code: String,
    product_name: String,
}

impl ItemRow {
    fn into_detail(self) -> OrderItemDetail {
        OrderItemDetail {
            item: OrderItem {
                id: self.id,
                order_id: self.order_id,
                product_id: self.product_id,
                quantity: self.quantity,
                unit_price: self.unit_price,
                created_at: self.created_at,
            },
            product_code: self.product_code,
            product_name: self.product_name,
        }
    }
}

const ORDER_COLUMNS: &str =
    "id, order_number, customer_name, delivery_date, status, total_amount, created_at, updated_at";

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an order with its item lines in one database transaction
    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<OrderWithItems> {
        validate_code(&input.order_number).map_err(|msg| AppError::Validation {
            field: "order_number".to_string(),
            message: msg.to_string(),
            message_vi: "Số đơn hàng không được để trống".to_string(),
        })?;

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE order_number = $1")
                .bind(&input.order_number)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("order_number".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO orders (order_number, customer_name, delivery_date, status, total_amount)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING id
            "#,
        )
        .bind(&input.order_number)
        .bind(&input.customer_name)
        .bind(input.delivery_date)
        .bind(input.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        Self::write_items(&mut tx, order_id, &input.items).await?;

        tx.commit().await?;

        self.get_order(order_id).await
    }

    /// Insert item lines (price captured from the product) and store the
    /// derived total on the order row
    async fn write_items(
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        items: &[OrderItemInput],
    ) -> AppResult<()> {
        let mut priced_items: Vec<(i32, Decimal)> = Vec::with_capacity(items.len());

        for item in items {
            validate_item_quantity(item.quantity).map_err(|msg| AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
                message_vi: "Số lượng sản phẩm phải ít nhất là 1".to_string(),
            })?;

            let unit_price = sqlx::query_scalar::<_, Decimal>(
                "SELECT price FROM products WHERE id = $1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(unit_price)
            .execute(&mut **tx)
            .await?;

            priced_items.push((item.quantity, unit_price));
        }

        let total = order_total(&priced_items);

        sqlx::query("UPDATE orders SET total_amount = $1, updated_at = NOW() WHERE id = $2")
            .bind(total)
            .bind(order_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// List all orders, newest first
    pub async fn list_orders(&self) -> AppResult<Vec<OrderWithItems>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC",
        ))
        .fetch_all(&self.db)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let order = row.into_model()?;
            let items = self.load_items(order.id).await?;
            orders.push(OrderWithItems { order, items });
        }

        Ok(orders)
    }

    /// Get an order with its item lines
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<OrderWithItems> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1",
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let order = row.into_model()?;
        let items = self.load_items(order.id).await?;

        Ok(OrderWithItems { order, items })
    }

    async fn load_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItemDetail>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_price, oi.created_at,
                   p.code AS product_code, p.name AS product_name
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_detail).collect())
    }

    /// Update an order; a provided item list replaces the existing lines
    pub async fn update_order(
        &self,
        order_id: Uuid,
        input: UpdateOrderInput,
    ) -> AppResult<OrderWithItems> {
        let existing = self.get_order(order_id).await?.order;

        let order_number = input.order_number.unwrap_or(existing.order_number);
        let customer_name = input.customer_name.unwrap_or(existing.customer_name);
        let delivery_date = input.delivery_date.unwrap_or(existing.delivery_date);
        let status = input.status.unwrap_or(existing.status);

        validate_code(&order_number).map_err(|msg| AppError::Validation {
            field: "order_number".to_string(),
            message: msg.to_string(),
            message_vi: "Số đơn hàng không được để trống".to_string(),
        })?;

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE order_number = $1 AND id <> $2",
        )
        .bind(&order_number)
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        if duplicate > 0 {
            return Err(AppError::DuplicateEntry("order_number".to_string()));
        }

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE orders
            SET order_number = $1, customer_name = $2, delivery_date = $3, status = $4,
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&order_number)
        .bind(&customer_name)
        .bind(delivery_date)
        .bind(status.as_str())
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        if let Some(items) = &input.items {
            sqlx::query("DELETE FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .execute(&mut *tx)
                .await?;

            Self::write_items(&mut tx, order_id, items).await?;
        }

        tx.commit().await?;

        self.get_order(order_id).await
    }

    /// Delete an order; its item lines go with it (cascade)
    pub async fn delete_order(&self, order_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order".to_string()));
        }

        Ok(())
    }
}
