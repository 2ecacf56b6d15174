use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{
    AddSparePartUsageRequest, CreateMaintenanceRequest, MaintenanceDetailResponse,
    MaintenanceListQuery, SparePartUsageResponse, UpdateMaintenanceRequest,
};
use crate::middleware::auth::AuthContext;
use crate::models::maintenance::Maintenance;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance).get(list_maintenances))
        .route(
            "/:id",
            get(get_maintenance)
                .put(update_maintenance)
                .delete(delete_maintenance),
        )
        .route("/:id/spare-parts", post(add_spare_part))
        .route("/:id/spare-parts/:usage_id", delete(remove_spare_part))
}

async fn create_maintenance(
    State(state): State<AppState>,
    context: AuthContext,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<Maintenance>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.create(&context, request).await?;
    Ok(Json(response))
}

async fn list_maintenances(
    State(state): State<AppState>,
    context: AuthContext,
    Query(query): Query<MaintenanceListQuery>,
) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.list(&context, query.vehicle_id).await?;
    Ok(Json(response))
}

async fn get_maintenance(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceDetailResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.get_by_id(&context, id).await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<Maintenance>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.update(&context, id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.delete(&context, id).await?;
    Ok(Json(response))
}

async fn add_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<AddSparePartUsageRequest>,
) -> Result<Json<ApiResponse<SparePartUsageResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.add_spare_part(&context, id, request).await?;
    Ok(Json(response))
}

async fn remove_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Path((id, usage_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.remove_spare_part(&context, id, usage_id).await?;
    Ok(Json(response))
}
