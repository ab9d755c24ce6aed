//! Customer order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Document number (e.g., "DH-2025-001")
    pub order_number: String,
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    /// Always derived from the item lines, never trusted from input
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order lifecycle, mirroring the production status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProduction,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_production" => Ok(OrderStatus::InProduction),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// One product line on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price copied from the product at the time the line was added
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Compute an order total from its item lines.
///
/// Pure derived-view function, kept separate from the atomic write path.
pub fn order_total(items: &[(i32, Decimal)]) -> Decimal {
    items
        .iter()
        .map(|(quantity, unit_price)| Decimal::from(*quantity) * unit_price)
        .sum()
}
