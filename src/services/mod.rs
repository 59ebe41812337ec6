//! Services module
//!
//! Lógica de negocio por encima del store: consultas espaciales, política de
//! acceso y carga de datos de ejemplo.

pub mod access_policy;
pub mod query_service;
pub mod sample_data;

pub use access_policy::AccessPolicy;
pub use query_service::{NearbyMatch, NearbyQuery, QueryService};
