//! Rutas
//!
//! Cada entidad tiene su router anidado bajo /api; los handlers son finos y
//! delegan en los controllers.

pub mod dashboard_routes;
pub mod maintenance_routes;
pub mod maintenance_type_routes;
pub mod spare_part_routes;
pub mod vehicle_routes;

use axum::{extract::State, response::Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check simple, con el entorno configurado
pub async fn health_endpoint(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "autocare-backend",
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/maintenance-types",
            maintenance_type_routes::create_maintenance_type_router(),
        )
        .nest("/spare-parts", spare_part_routes::create_spare_part_router())
        .nest("/maintenances", maintenance_routes::create_maintenance_router())
        .nest("/dashboard", dashboard_routes::create_dashboard_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::environment::EnvironmentConfig;

    // Pool perezoso: no abre ninguna conexión, alcanza para rutas sin DB
    fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
        };
        AppState::new(pool, config)
    }

    #[tokio::test]
    async fn test_health_reports_environment_from_state() {
        let app = Router::new()
            .route("/health", get(health_endpoint))
            .with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "autocare-backend");
        assert_eq!(body["environment"], "test");
    }
}
