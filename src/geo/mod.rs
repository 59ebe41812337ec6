//! Cálculos geográficos
//!
//! Distancia de gran círculo (Haversine) y filtro por bounding box.
//! No hay corrección elipsoidal: no asumir precisión sub-métrica.

pub mod bounds;
pub mod distance;

pub use bounds::BoundingBox;
pub use distance::{haversine_distance, EARTH_RADIUS_M};
