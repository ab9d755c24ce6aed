//! Business logic services for the Wood Workshop Management backend

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod order;
pub mod product;
pub mod worker;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use inventory::InventoryService;
pub use order::OrderService;
pub use product::ProductService;
pub use worker::WorkerService;
