//! HTTP handlers for raw-material inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{
    CreateMaterialInput, InventoryService, RecordTransactionInput, StockStatusView,
    UpdateMaterialInput,
};
use crate::AppState;
use shared::models::{Material, StockTransaction};

/// Create a material (admin only)
pub async fn create_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<(StatusCode, Json<Material>)> {
    current_user.0.require_admin()?;
    let service = InventoryService::new(state.db);
    let material = service.create_material(input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// List all materials
pub async fn list_materials(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Material>>> {
    let service = InventoryService::new(state.db);
    let materials = service.list_materials().await?;
    Ok(Json(materials))
}

/// Get a single material
pub async fn get_material(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = InventoryService::new(state.db);
    let material = service.get_material(material_id).await?;
    Ok(Json(material))
}

/// Update a material (admin only)
pub async fn update_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<Material>> {
    current_user.0.require_admin()?;
    let service = InventoryService::new(state.db);
    let material = service.update_material(material_id, input).await?;
    Ok(Json(material))
}

/// Delete a material (admin only)
pub async fn delete_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_admin()?;
    let service = InventoryService::new(state.db);
    service.delete_material(material_id).await?;
    Ok(Json(()))
}

/// Record a stock transaction against a material (admin only)
pub async fn record_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<RecordTransactionInput>,
) -> AppResult<(StatusCode, Json<StockTransaction>)> {
    current_user.0.require_admin()?;
    let service = InventoryService::new(state.db);
    let transaction = service.record_transaction(material_id, input).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Get the transaction history for a material, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let service = InventoryService::new(state.db);
    let transactions = service.list_transactions(material_id).await?;
    Ok(Json(transactions))
}

/// Get the stock health classification for a material
pub async fn get_stock_status(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<StockStatusView>> {
    let service = InventoryService::new(state.db);
    let status = service.get_stock_status(material_id).await?;
    Ok(Json(status))
}
