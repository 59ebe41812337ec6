pub mod location_controller;

pub use location_controller::LocationController;
