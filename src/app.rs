//! Construcción del router HTTP

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth::optional_auth_middleware, cors::cors_layer};
use crate::routes::{create_health_router, create_location_router};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(create_health_router())
        .merge(create_location_router())
        .layer(from_fn_with_state(state.clone(), optional_auth_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
