use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::maintenance_type_controller::MaintenanceTypeController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_type_dto::{
    CreateMaintenanceTypeRequest, MaintenanceTypeResponse, UpdateMaintenanceTypeRequest,
};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_type_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance_type).get(list_maintenance_types))
        .route(
            "/:id",
            get(get_maintenance_type)
                .put(update_maintenance_type)
                .delete(delete_maintenance_type),
        )
}

async fn create_maintenance_type(
    State(state): State<AppState>,
    context: AuthContext,
    Json(request): Json<CreateMaintenanceTypeRequest>,
) -> Result<Json<ApiResponse<MaintenanceTypeResponse>>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.create(&context, request).await?;
    Ok(Json(response))
}

async fn list_maintenance_types(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.list(&context).await?;
    Ok(Json(response))
}

async fn get_maintenance_type(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceTypeResponse>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.get_by_id(&context, id).await?;
    Ok(Json(response))
}

async fn update_maintenance_type(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceTypeRequest>,
) -> Result<Json<ApiResponse<MaintenanceTypeResponse>>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.update(&context, id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance_type(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.delete(&context, id).await?;
    Ok(Json(response))
}
