pub mod location_repository;
pub mod memory_repository;

pub use location_repository::{
    ListOrder, ListQuery, LocationFilter, LocationStore, PgLocationRepository, Slice,
};
pub use memory_repository::InMemoryLocationRepository;
