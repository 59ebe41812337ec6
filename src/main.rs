use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use location_service::{
    build_router,
    config::{DatabaseConfig, EnvironmentConfig, StorageBackend},
    database::{create_pool, run_migrations},
    repositories::{InMemoryLocationRepository, LocationStore, PgLocationRepository},
    routes::LOCATIONS_PATH,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🗺️ Location Service - API GeoJSON");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let store = build_store(&config).await?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST/PORT no forman una dirección válida")?;

    info!("🌐 Servidor iniciando en {}", config.server_url());
    info!("🔐 Política de escritura: {:?}", config.write_policy);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📍 Endpoints - Locations:");
    info!("   GET    {}/ - Listar locations (page, search)", LOCATIONS_PATH);
    info!("   POST   {}/ - Crear location (GeoJSON Feature)", LOCATIONS_PATH);
    info!("   GET    {}/:id/ - Obtener location", LOCATIONS_PATH);
    info!("   PUT    {}/:id/ - Reemplazar location", LOCATIONS_PATH);
    info!("   PATCH  {}/:id/ - Actualizar location", LOCATIONS_PATH);
    info!("   DELETE {}/:id/ - Eliminar location", LOCATIONS_PATH);
    info!("   GET    {}/nearby/?lat&lon&distance - Locations cercanas", LOCATIONS_PATH);
    info!(
        "   GET    {}/within_bounds/?min_lat&max_lat&min_lon&max_lon - Bounding box",
        LOCATIONS_PATH
    );

    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo abrir {}", addr))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Store según STORAGE_BACKEND
async fn build_store(config: &EnvironmentConfig) -> Result<Arc<dyn LocationStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            warn!("💭 Usando store en memoria: los datos no sobreviven al reinicio");
            Ok(Arc::new(InMemoryLocationRepository::new()))
        }
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = create_pool(&db_config).await?;

            if config.run_migrations {
                run_migrations(&pool).await.context("Error aplicando migraciones")?;
            }

            Ok(Arc::new(PgLocationRepository::new(pool)))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
