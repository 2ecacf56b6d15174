use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// Función helper para crear una app de test con las formas de respuesta
// del servicio real (sin base de datos)
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "ok",
                    "service": "autocare-backend",
                }))
            }),
        )
        .route(
            "/api/vehicles",
            post(|| async {
                (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Kendaraan berhasil ditambahkan",
                        "data": { "license_plate": "B 1234 CD" },
                        "redirect": "/vehicles?success=Kendaraan%20berhasil%20ditambahkan",
                    })),
                )
            }),
        )
        .route(
            "/api/vehicles/:id",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "Not Found",
                        "message": "Vehicle with identifier 'missing' not found",
                    })),
                )
                    .into_response()
            }),
        )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "autocare-backend");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-such-entity")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_response_shape() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/vehicles")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Kendaraan berhasil ditambahkan");
    // El redirect lleva el mensaje de éxito urlencodeado en la query
    assert_eq!(
        body["redirect"],
        "/vehicles?success=Kendaraan%20berhasil%20ditambahkan"
    );
}

#[tokio::test]
async fn test_not_found_error_shape() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/vehicles/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("Vehicle"));
}
