use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;

/// Rectángulo lat/lon alineado a los ejes (intervalos cerrados).
///
/// No hay soporte para cruzar el antimeridiano: con `min_lon > max_lon`
/// ningún punto queda dentro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    #[inline]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }

    /// true si algún rango está invertido (incluye cajas que cruzan ±180°)
    pub fn is_inverted(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midtown() -> BoundingBox {
        BoundingBox::new(40.7, 40.8, -74.0, -73.9)
    }

    #[test]
    fn test_contains_interior_point() {
        assert!(midtown().contains(&GeoPoint::new(-73.9857, 40.7484)));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let bbox = midtown();
        assert!(bbox.contains(&GeoPoint::new(-74.0, 40.7)));
        assert!(bbox.contains(&GeoPoint::new(-73.9, 40.8)));
    }

    #[test]
    fn test_outside_points() {
        let bbox = midtown();
        assert!(!bbox.contains(&GeoPoint::new(-74.0445, 40.6892)));
        assert!(!bbox.contains(&GeoPoint::new(-118.2437, 34.0522)));
    }

    #[test]
    fn test_date_line_box_matches_nothing() {
        let bbox = BoundingBox::new(-10.0, 10.0, 170.0, -170.0);
        assert!(bbox.is_inverted());
        assert!(!bbox.contains(&GeoPoint::new(180.0, 0.0)));
        assert!(!bbox.contains(&GeoPoint::new(-175.0, 0.0)));
        assert!(!bbox.contains(&GeoPoint::new(0.0, 0.0)));
    }
}
