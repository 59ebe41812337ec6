//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos PostgreSQL con PostGIS.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    log::info!("🗄️ Conectando a {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .with_context(|| format!("Error conectando a {}", mask_database_url(&config.url)))?;

    log::info!("✅ Pool de PostgreSQL listo (max {} conexiones)", config.max_connections);
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos (PostGIS + tabla locations)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("🔄 Ejecutando migraciones...");
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(_colon_pos) = url[..at_pos].rfind(':') {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
