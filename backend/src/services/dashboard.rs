//! Dashboard statistics service
//!
//! The six counters of the overview screen, computed in one query each from
//! the stored fields; low-stock counting reuses the deficient band of the
//! stock classification (current_stock <= min_stock).

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Dashboard service for the overview counters
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// System-wide counters for the overview screen
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub completed_products: i64,
    pub active_orders: i64,
    pub orders_in_production: i64,
    pub total_workers: i64,
    pub low_stock_items: i64,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Collect the overview counters
    pub async fn get_stats(&self) -> AppResult<DashboardStats> {
        let (total_products, completed_products) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE production_status = 'completed')
            FROM products
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let (active_orders, orders_in_production) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*) FILTER (WHERE status <> 'completed'),
                   COUNT(*) FILTER (WHERE status = 'in_production')
            FROM orders
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let total_workers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workers")
                .fetch_one(&self.db)
                .await?;

        let low_stock_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE current_stock <= min_stock",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardStats {
            total_products,
            completed_products,
            active_orders,
            orders_in_production,
            total_workers,
            low_stock_items,
        })
    }
}
