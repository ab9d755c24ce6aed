//! Domain models for the Wood Workshop Management system

mod material;
mod order;
mod product;
mod user;
mod worker;

pub use material::*;
pub use order::*;
pub use product::*;
pub use user::*;
pub use worker::*;
