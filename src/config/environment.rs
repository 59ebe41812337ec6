//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Política de escritura sobre locations (lecturas siempre abiertas)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Cualquiera puede crear/actualizar/eliminar
    Open,
    /// Escrituras requieren un caller autenticado
    Authenticated,
    /// Como Authenticated, pero DELETE requiere rol admin
    Admin,
}

impl FromStr for WritePolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Ok(WritePolicy::Open),
            "authenticated" => Ok(WritePolicy::Authenticated),
            "admin" => Ok(WritePolicy::Admin),
            other => Err(anyhow!("Unknown WRITE_POLICY '{}'", other)),
        }
    }
}

/// Backend de almacenamiento de locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown STORAGE_BACKEND '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub write_policy: WritePolicy,
    pub storage_backend: StorageBackend,
    pub log_level: tracing::Level,
    pub run_migrations: bool,
}

impl Default for EnvironmentConfig {
    /// Valores de desarrollo (no lee variables de entorno)
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "development-secret".to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            write_policy: WritePolicy::Open,
            storage_backend: StorageBackend::Postgres,
            log_level: tracing::Level::DEBUG,
            run_migrations: false,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno sobre los valores por defecto
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: parse_var("JWT_EXPIRATION")?.unwrap_or(defaults.jwt_expiration),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            write_policy: parse_var("WRITE_POLICY")?.unwrap_or(defaults.write_policy),
            storage_backend: parse_var("STORAGE_BACKEND")?.unwrap_or(defaults.storage_backend),
            log_level: parse_var("LOG_LEVEL")?.unwrap_or(defaults.log_level),
            run_migrations: parse_var("RUN_MIGRATIONS")?.unwrap_or(defaults.run_migrations),
        };

        if config.is_production() && config.jwt_secret == "development-secret" {
            return Err(anyhow!("JWT_SECRET must be set in production"));
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leer y parsear una variable opcional; error si existe pero es inválida
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        _ => Ok(None),
    }
}
