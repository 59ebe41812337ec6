//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::location_repository::LocationStore;
use crate::services::access_policy::AccessPolicy;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LocationStore>,
    pub config: EnvironmentConfig,
    pub policy: AccessPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn LocationStore>, config: EnvironmentConfig) -> Self {
        let policy = AccessPolicy::new(config.write_policy);
        Self { store, config, policy }
    }
}
