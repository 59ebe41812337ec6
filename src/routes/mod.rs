pub mod health_routes;
pub mod location_routes;

pub use health_routes::create_health_router;
pub use location_routes::{create_location_router, LOCATIONS_PATH};
