use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::spare_part_controller::SparePartController;
use crate::dto::common::ApiResponse;
use crate::dto::spare_part_dto::{
    CreateSparePartRequest, SparePartResponse, UpdateSparePartRequest,
};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_spare_part_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_spare_part).get(list_spare_parts))
        .route(
            "/:id",
            get(get_spare_part)
                .put(update_spare_part)
                .delete(delete_spare_part),
        )
}

async fn create_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Json(request): Json<CreateSparePartRequest>,
) -> Result<Json<ApiResponse<SparePartResponse>>, AppError> {
    let controller = SparePartController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.create(&context, request).await?;
    Ok(Json(response))
}

async fn list_spare_parts(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<Json<Value>, AppError> {
    let controller = SparePartController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.list(&context).await?;
    Ok(Json(response))
}

async fn get_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<SparePartResponse>, AppError> {
    let controller = SparePartController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.get_by_id(&context, id).await?;
    Ok(Json(response))
}

async fn update_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSparePartRequest>,
) -> Result<Json<ApiResponse<SparePartResponse>>, AppError> {
    let controller = SparePartController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.update(&context, id, request).await?;
    Ok(Json(response))
}

async fn delete_spare_part(
    State(state): State<AppState>,
    context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = SparePartController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.delete(&context, id).await?;
    Ok(Json(response))
}
