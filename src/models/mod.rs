//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL/PostGIS.

pub mod location;
pub mod operation;

pub use location::*;
pub use operation::Operation;
