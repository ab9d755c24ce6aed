//! HTTP handlers for the Wood Workshop Management backend

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod order;
pub mod product;
pub mod worker;

pub use auth::*;
pub use dashboard::*;
pub use health::*;
pub use inventory::*;
pub use order::*;
pub use product::*;
pub use worker::*;
