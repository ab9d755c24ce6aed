//! Route definitions for the Wood Workshop Management API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (login/refresh public, profile protected)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - product catalog
        .nest("/products", product_routes(state.clone()))
        // Protected routes - customer orders
        .nest("/orders", order_routes(state.clone()))
        // Protected routes - workshop workers
        .nest("/workers", worker_routes(state.clone()))
        // Protected routes - materials and the stock ledger
        .nest("/materials", material_routes(state.clone()))
        // Protected routes - dashboard counters
        .nest("/dashboard", dashboard_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .merge(profile_routes(state))
}

/// Profile routes (protected)
fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Customer order routes (protected)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Worker roster routes (protected)
fn worker_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_workers).post(handlers::create_worker))
        .route(
            "/:worker_id",
            get(handlers::get_worker)
                .put(handlers::update_worker)
                .delete(handlers::delete_worker),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Material and stock-ledger routes (protected)
fn material_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_materials).post(handlers::create_material))
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route(
            "/:material_id/transactions",
            get(handlers::list_transactions).post(handlers::record_transaction),
        )
        .route("/:material_id/status", get(handlers::get_stock_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::get_dashboard_stats))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
