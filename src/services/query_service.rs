//! Servicio de consultas espaciales
//!
//! `nearby` (radio alrededor de un punto) y `within_bounds` (bounding box).
//! Ambas operaciones son de solo lectura y validan los parámetros antes de
//! tocar el store.

use std::sync::Arc;

use serde::Deserialize;

use crate::geo::{haversine_distance, BoundingBox};
use crate::models::location::{GeoPoint, Location};
use crate::repositories::location_repository::{ListOrder, ListQuery, LocationFilter, LocationStore};
use crate::utils::errors::{invalid_parameter_error, missing_parameter_error, AppError, AppResult};
use crate::utils::validation::{parse_finite_f64, validate_non_negative};

/// Radio por defecto de `nearby`, en metros
pub const DEFAULT_NEARBY_DISTANCE_M: f64 = 1000.0;

/// Query string cruda de `nearby` (todo texto, se valida después)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub distance: Option<String>,
}

/// Query string cruda de `within_bounds`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BoundsParams {
    pub min_lat: Option<String>,
    pub max_lat: Option<String>,
    pub min_lon: Option<String>,
    pub max_lon: Option<String>,
}

/// Consulta `nearby` ya validada
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub distance_m: f64,
}

/// Resultado de `nearby`: la location y su distancia al punto de consulta
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyMatch {
    pub location: Location,
    pub distance_m: f64,
}

/// Valor presente y no vacío
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_f64(name: &str, value: &Option<String>) -> AppResult<f64> {
    let raw = present(value).ok_or_else(|| missing_parameter_error(name))?;
    parse_finite_f64(raw).ok_or_else(|| invalid_parameter_error(name, raw))
}

impl NearbyQuery {
    pub fn parse(params: &NearbyParams) -> AppResult<Self> {
        if present(&params.lat).is_none() || present(&params.lon).is_none() {
            return Err(AppError::MissingParameter(
                "Both lat and lon parameters are required".to_string(),
            ));
        }

        let lat = require_f64("lat", &params.lat)?;
        let lon = require_f64("lon", &params.lon)?;

        let distance_m = match present(&params.distance) {
            Some(raw) => {
                let distance =
                    parse_finite_f64(raw).ok_or_else(|| invalid_parameter_error("distance", raw))?;
                validate_non_negative(distance)
                    .map_err(|_| invalid_parameter_error("distance", raw))?;
                distance
            }
            None => DEFAULT_NEARBY_DISTANCE_M,
        };

        Ok(Self {
            center: GeoPoint::new(lon, lat),
            distance_m,
        })
    }
}

impl BoundingBox {
    /// Los cuatro parámetros son obligatorios; no se valida min <= max
    pub fn parse(params: &BoundsParams) -> AppResult<Self> {
        Ok(Self::new(
            require_f64("min_lat", &params.min_lat)?,
            require_f64("max_lat", &params.max_lat)?,
            require_f64("min_lon", &params.min_lon)?,
            require_f64("max_lon", &params.max_lon)?,
        ))
    }
}

pub struct QueryService {
    store: Arc<dyn LocationStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Locations a `distance` metros o menos de (lat, lon), la más cercana primero.
    ///
    /// Empates de distancia se ordenan por id ascendente.
    pub async fn nearby(&self, params: &NearbyParams) -> AppResult<Vec<NearbyMatch>> {
        let query = NearbyQuery::parse(params)?;
        self.nearby_point(query).await
    }

    pub async fn nearby_point(&self, query: NearbyQuery) -> AppResult<Vec<NearbyMatch>> {
        log::debug!(
            "📍 nearby lat={} lon={} distance={}m",
            query.center.latitude,
            query.center.longitude,
            query.distance_m
        );

        let candidates = self
            .store
            .list(&ListQuery::new(
                LocationFilter::WithinRadius {
                    center: query.center,
                    meters: query.distance_m,
                },
                ListOrder::IdAscending,
            ))
            .await?;

        let mut matches: Vec<NearbyMatch> = candidates
            .into_iter()
            .map(|location| NearbyMatch {
                distance_m: haversine_distance(&query.center, &location.point),
                location,
            })
            .filter(|m| m.distance_m <= query.distance_m)
            .collect();

        matches.sort_by(|a, b| {
            a.distance_m
                .total_cmp(&b.distance_m)
                .then(a.location.id.cmp(&b.location.id))
        });

        log::debug!("📍 nearby -> {} resultados", matches.len());
        Ok(matches)
    }

    /// Locations dentro del bounding box, en el orden por defecto (más nuevas primero)
    pub async fn within_bounds(&self, params: &BoundsParams) -> AppResult<Vec<Location>> {
        let bbox = BoundingBox::parse(params)?;
        self.within_box(bbox).await
    }

    pub async fn within_box(&self, bbox: BoundingBox) -> AppResult<Vec<Location>> {
        if bbox.is_inverted() {
            // Sin soporte de antimeridiano: el resultado será vacío
            log::debug!("🗺️ bounding box invertido: {:?}", bbox);
        }

        self.store
            .list(&ListQuery::new(
                LocationFilter::WithinBounds(bbox),
                ListOrder::NewestFirst,
            ))
            .await
    }
}
