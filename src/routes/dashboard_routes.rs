use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;

use crate::controllers::dashboard_controller::DashboardController;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<Json<Value>, AppError> {
    let controller = DashboardController::new(state.pool.clone(), state.view_cache.clone());
    let response = controller.get(&context).await?;
    Ok(Json(response))
}
