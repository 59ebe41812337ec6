pub mod location_dto;
pub mod pagination;

pub use location_dto::*;
pub use pagination::{ListParams, PageRequest, Paginated, PAGE_SIZE};
