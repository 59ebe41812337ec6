//! Modelo de Location
//!
//! Este módulo contiene el struct Location, el punto geográfico WGS84 y las
//! estructuras de creación/actualización que se pasan al store.
//! Mapea a la tabla `locations` (columna `point` geometry(Point, 4326)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SRID del sistema de referencia WGS84 (grados decimales)
pub const WGS84_SRID: i32 = 4326;

/// Punto geográfico (longitud = x, latitud = y) en WGS84
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }

    pub fn srid(&self) -> i32 {
        WGS84_SRID
    }

    /// Coordenadas en orden GeoJSON: [lon, lat]
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Location persistida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub point: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Latitud derivada del punto (solo lectura)
    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    /// Longitud derivada del punto (solo lectura)
    pub fn longitude(&self) -> f64 {
        self.point.x()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Datos para insertar una nueva location.
///
/// Los campos opcionales se rellenan aquí con cadena vacía, nunca en el schema.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub address: String,
    pub point: GeoPoint,
}

impl NewLocation {
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            address: String::new(),
            point,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

/// Cambios parciales sobre una location existente (None = sin cambio)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub point: Option<GeoPoint>,
}

impl LocationChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.point.is_none()
    }

    /// Aplica los cambios sobre una copia en memoria
    pub fn apply_to(self, location: &mut Location, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            location.name = name;
        }
        if let Some(description) = self.description {
            location.description = description;
        }
        if let Some(address) = self.address {
            location.address = address;
        }
        if let Some(point) = self.point {
            location.point = point;
        }
        location.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location_defaults_to_empty_strings() {
        let location = NewLocation::new("Eiffel Tower", GeoPoint::new(2.3522, 48.8566));

        assert_eq!(location.description, "");
        assert_eq!(location.address, "");
        assert_eq!(location.point.srid(), WGS84_SRID);
    }

    #[test]
    fn test_point_derived_fields() {
        let point = GeoPoint::new(-74.006012345, 40.712845678);
        assert_eq!(point.x(), -74.006012345);
        assert_eq!(point.y(), 40.712845678);
        assert_eq!(point.coordinates(), [-74.006012345, 40.712845678]);
    }

    #[test]
    fn test_changes_refresh_updated_at_only() {
        let created = Utc::now();
        let mut location = Location {
            id: 1,
            name: "Location 1".to_string(),
            description: "First".to_string(),
            address: "Address 1".to_string(),
            point: GeoPoint::new(-74.0060, 40.7128),
            created_at: created,
            updated_at: created,
        };

        let later = created + chrono::Duration::seconds(5);
        LocationChanges {
            description: Some("Partially updated description".to_string()),
            ..Default::default()
        }
        .apply_to(&mut location, later);

        assert_eq!(location.name, "Location 1");
        assert_eq!(location.description, "Partially updated description");
        assert_eq!(location.created_at, created);
        assert_eq!(location.updated_at, later);
    }
}
