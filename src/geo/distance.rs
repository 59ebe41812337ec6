use crate::models::location::GeoPoint;

/// Radio medio de la Tierra en metros
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distancia de gran círculo (Haversine) en metros entre dos puntos WGS84.
///
/// Simétrica, cero si los puntos coinciden y creciente con la separación angular.
#[inline]
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // a puede salirse de [0, 1] por redondeo en puntos antipodales
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}
