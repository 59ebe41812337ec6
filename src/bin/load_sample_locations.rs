//! Carga los landmarks de ejemplo en la base de datos (get-or-create por nombre)

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;

use location_service::{
    config::{DatabaseConfig, EnvironmentConfig},
    database::{create_pool, run_migrations},
    repositories::PgLocationRepository,
    services::sample_data::{load_sample_locations, LoadOutcome},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let pool = create_pool(&DatabaseConfig::from_env()?).await?;
    if config.run_migrations {
        run_migrations(&pool).await.context("Error aplicando migraciones")?;
    }

    let store = PgLocationRepository::new(pool);
    let outcomes = load_sample_locations(&store)
        .await
        .context("Error cargando locations de ejemplo")?;

    let created = outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::Created(_)))
        .count();
    info!(
        "📦 Locations de ejemplo: {} creadas, {} ya existían",
        created,
        outcomes.len() - created
    );

    Ok(())
}
