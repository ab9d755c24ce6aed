//! Request middleware for the Wood Workshop Management backend

mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
