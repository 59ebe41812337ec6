//! Servicio de locations geoespaciales
//!
//! API REST (GeoJSON) sobre un store de puntos WGS84 con consultas por radio
//! y por bounding box.

pub mod app;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use app::build_router;
pub use state::AppState;
