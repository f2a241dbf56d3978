use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use fleet_agenda::cache::{redis_client::RedisClient, CacheConfig};
use fleet_agenda::config::environment::EnvironmentConfig;
use fleet_agenda::database::DatabaseConnection;
use fleet_agenda::middleware::cors::cors_middleware;
use fleet_agenda::routes;
use fleet_agenda::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚐 Fleet Agenda - Agenda de viajes compartidos");
    info!("==============================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis para el espejo offline de agendamientos
    let redis_config = CacheConfig {
        redis_url: config.redis_url.clone(),
        default_ttl: 3600,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => {
            info!("✅ Redis conectado exitosamente");
            client
        }
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let app_state = AppState::new(pool, config.clone(), redis_client);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/agenda", routes::agenda_routes::create_agenda_router())
        .nest("/api/booking", routes::booking_routes::create_booking_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📅 Endpoints - Agenda:");
    info!("   GET  /api/agenda - Vista actual (calendario + detalle del día)");
    info!("   POST /api/agenda/select-day - Seleccionar día");
    info!("   POST /api/agenda/navigate - Navegar mes anterior/siguiente");
    info!("   POST /api/agenda/form/open - Abrir formulario (requiere día seleccionado)");
    info!("   POST /api/agenda/form/close - Cerrar formulario");
    info!("   POST /api/agenda/form/save - Validar y guardar agendamiento");
    info!("   DELETE /api/agenda/booking/:id?confirm=true - Eliminar y recargar");
    info!("🚌 Endpoints - Booking:");
    info!("   POST /api/booking - Crear agendamiento");
    info!("   GET  /api/booking - Listar agendamientos (?date=YYYY-MM-DD)");
    info!("   GET  /api/booking/:id - Obtener agendamiento");
    info!("   PUT  /api/booking/:id - Reemplazar agendamiento");
    info!("   DELETE /api/booking/:id?confirm=true - Eliminar agendamiento");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos (?status=available)");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id?confirm=true - Eliminar vehículo");
    info!("🧑 Endpoints - Driver:");
    info!("   POST /api/driver - Crear conductor");
    info!("   GET  /api/driver - Listar conductores (?status=available)");
    info!("   GET  /api/driver/:id - Obtener conductor");
    info!("   PUT  /api/driver/:id - Actualizar conductor");
    info!("   DELETE /api/driver/:id?confirm=true - Eliminar conductor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-agenda",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
