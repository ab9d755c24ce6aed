//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A furniture product manufactured by the workshop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Short product code (e.g., "BAN-01")
    pub code: String,
    pub name: String,
    /// Wood species the product is made from
    pub wood_type: String,
    /// Free-text dimensions (e.g., "120x60x75 cm")
    pub dimensions: String,
    pub price: Decimal,
    pub production_status: ProductionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Production lifecycle of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Pending,
    InProduction,
    Completed,
}

impl ProductionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionStatus::Pending => "pending",
            ProductionStatus::InProduction => "in_production",
            ProductionStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ProductionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProductionStatus::Pending),
            "in_production" => Ok(ProductionStatus::InProduction),
            "completed" => Ok(ProductionStatus::Completed),
            other => Err(format!("unknown production status: {}", other)),
        }
    }
}
