use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateMileageRequest, UpdateVehicleRequest, VehicleDetailResponse,
    VehicleResponse,
};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/mileage", patch(update_mileage))
}

async fn create_vehicle(
    State(state): State<AppState>,
    context: AuthContext,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.create(&context, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.list(&context).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.get_by_id(&context, id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.update(&context, id, request).await?;
    Ok(Json(response))
}

async fn update_mileage(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMileageRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.update_mileage(&context, id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.delete(&context, id).await?;
    Ok(Json(response))
}
