//! HTTP handlers for workshop worker endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::worker::{CreateWorkerInput, UpdateWorkerInput, WorkerService};
use crate::AppState;
use shared::models::Worker;

/// Create a worker (admin only)
pub async fn create_worker(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateWorkerInput>,
) -> AppResult<(StatusCode, Json<Worker>)> {
    current_user.0.require_admin()?;
    let service = WorkerService::new(state.db);
    let worker = service.create_worker(input).await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

/// List all workers
pub async fn list_workers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Worker>>> {
    let service = WorkerService::new(state.db);
    let workers = service.list_workers().await?;
    Ok(Json(workers))
}

/// Get a single worker
pub async fn get_worker(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(worker_id): Path<Uuid>,
) -> AppResult<Json<Worker>> {
    let service = WorkerService::new(state.db);
    let worker = service.get_worker(worker_id).await?;
    Ok(Json(worker))
}

/// Update a worker (admin only)
pub async fn update_worker(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(worker_id): Path<Uuid>,
    Json(input): Json<UpdateWorkerInput>,
) -> AppResult<Json<Worker>> {
    current_user.0.require_admin()?;
    let service = WorkerService::new(state.db);
    let worker = service.update_worker(worker_id, input).await?;
    Ok(Json(worker))
}

/// Delete a worker (admin only)
pub async fn delete_worker(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(worker_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_admin()?;
    let service = WorkerService::new(state.db);
    service.delete_worker(worker_id).await?;
    Ok(Json(()))
}
