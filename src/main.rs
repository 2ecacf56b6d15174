mod cache;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::auth::auth_context_layer;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = EnvironmentConfig::from_env();

    info!("🔧 AutoCare Backend - Admin de mantenimiento vehicular");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(routes::health_endpoint))
        .nest("/api", routes::create_api_router())
        .layer(axum::middleware::from_fn(auth_context_layer))
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Kendaraan:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Detalle con historial");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   PATCH /api/vehicles/:id/mileage - Actualizar kilometraje");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("🔩 Jenis perawatan:");
    info!("   POST /api/maintenance-types - Crear jenis");
    info!("   GET  /api/maintenance-types - Listar jenis");
    info!("   GET  /api/maintenance-types/:id - Obtener jenis");
    info!("   PUT  /api/maintenance-types/:id - Actualizar jenis");
    info!("   DELETE /api/maintenance-types/:id - Eliminar jenis");
    info!("🔧 Suku cadang:");
    info!("   POST /api/spare-parts - Crear repuesto");
    info!("   GET  /api/spare-parts - Listar con resumen de inventario");
    info!("   GET  /api/spare-parts/:id - Obtener repuesto");
    info!("   PUT  /api/spare-parts/:id - Actualizar repuesto");
    info!("   DELETE /api/spare-parts/:id - Eliminar repuesto");
    info!("🛠 Perawatan:");
    info!("   POST /api/maintenances - Registrar perawatan");
    info!("   GET  /api/maintenances?vehicle_id= - Listar (filtro opcional)");
    info!("   GET  /api/maintenances/:id - Detalle con repuestos usados");
    info!("   PUT  /api/maintenances/:id - Actualizar perawatan");
    info!("   DELETE /api/maintenances/:id - Eliminar perawatan");
    info!("   POST /api/maintenances/:id/spare-parts - Registrar uso de repuesto");
    info!("   DELETE /api/maintenances/:id/spare-parts/:usage_id - Quitar uso");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Totales y perawatan recientes");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
