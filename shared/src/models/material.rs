//! Raw-material inventory models
//!
//! A `Material` carries a cached `current_stock` that the ledger keeps in
//! sync with its append-only transaction history: current stock always
//! equals the declared initial quantity plus the signed sum of all
//! recorded transactions (imports positive, exports negative).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked raw-material stock item (a type/batch of wood)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    /// Short identifying code (e.g., "GO-SOI-01")
    pub wood_code: String,
    /// Human-readable wood type name
    pub wood_type: String,
    /// Declared initial quantity; seeds `current_stock` on creation
    pub quantity: Decimal,
    /// Cached running total maintained atomically with each transaction
    pub current_stock: Decimal,
    /// Minimum stock threshold for status banding
    pub min_stock: Decimal,
    pub unit: Unit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unit of measure for a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Cubic meters (volume)
    M3,
    /// Kilograms (weight)
    Kg,
    /// Count of boards
    Board,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::M3 => "m3",
            Unit::Kg => "kg",
            Unit::Board => "board",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m3" => Ok(Unit::M3),
            "kg" => Ok(Unit::Kg),
            "board" => Ok(Unit::Board),
            other => Err(format!("unknown unit: {}", other)),
        }
    }
}

/// Derived three-way stock health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Stock at or below the minimum threshold
    Deficient,
    /// Stock above the threshold but within 1.5x of it (inclusive)
    Low,
    Sufficient,
}

impl StockStatus {
    /// Classify stock health from the two stored numeric fields.
    ///
    /// Pure and total over all non-negative inputs; never stored.
    pub fn classify(current_stock: Decimal, min_stock: Decimal) -> Self {
        let low_ceiling = min_stock * Decimal::new(15, 1); // 1.5x threshold
        if current_stock <= min_stock {
            StockStatus::Deficient
        } else if current_stock <= low_ceiling {
            StockStatus::Low
        } else {
            StockStatus::Sufficient
        }
    }
}

impl Material {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.min_stock)
    }
}

/// An immutable, timestamped import or export event against one material.
///
/// Transactions are never edited or deleted, only appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    pub material_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    /// Document reference (e.g., "PNK-001" for imports, "PXK-001" for exports)
    pub reference_number: Option<String>,
    pub note: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Direction of a stock transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Increases stock
    Import,
    /// Decreases stock
    Export,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Import => "import",
            TransactionType::Export => "export",
        }
    }

    /// Sign applied to the quantity when folding into the running total
    pub fn signed(&self, quantity: Decimal) -> Decimal {
        match self {
            TransactionType::Import => quantity,
            TransactionType::Export => -quantity,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "import" => Ok(TransactionType::Import),
            "export" => Ok(TransactionType::Export),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// Replay a transaction history against an initial quantity.
///
/// The ledger never does this at read time (the running total is cached),
/// but reconciliation and tests rely on it being the source of truth.
pub fn replay_stock(initial: Decimal, transactions: &[(TransactionType, Decimal)]) -> Decimal {
    transactions
        .iter()
        .fold(initial, |stock, (ttype, qty)| stock + ttype.signed(*qty))
}

/// Order a transaction history newest first: by transaction date, then by
/// insertion time for same-instant rows. Stable, so already-sorted input
/// is left untouched.
pub fn sort_newest_first(transactions: &mut [StockTransaction]) {
    transactions.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then(b.created_at.cmp(&a.created_at))
    });
}
