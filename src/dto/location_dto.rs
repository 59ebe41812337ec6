use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::location::{GeoPoint, Location, LocationChanges, NewLocation};
use crate::models::Operation;
use crate::services::query_service::NearbyMatch;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    required_field_error, validate_latitude, validate_longitude, validate_not_blank,
};

// Request: GeoJSON Feature con properties.name y geometry.coordinates = [lon, lat]
#[derive(Debug, Default, Deserialize)]
pub struct LocationFeatureRequest {
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub geometry: Option<PointGeometryRequest>,
    pub properties: Option<LocationPropertiesRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointGeometryRequest {
    #[serde(rename = "type")]
    pub geometry_type: Option<String>,
    pub coordinates: Option<Vec<f64>>,
}

// latitude/longitude/created_at/updated_at se ignoran: son de solo lectura
#[derive(Debug, Default, Deserialize)]
pub struct LocationPropertiesRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Validate)]
struct LocationFields {
    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    name: Option<String>,
    description: Option<String>,
    #[validate(length(max = 300))]
    address: Option<String>,
}

impl PointGeometryRequest {
    fn to_point(&self, errors: &mut ValidationErrors) -> Option<GeoPoint> {
        if let Some(geometry_type) = &self.geometry_type {
            if geometry_type != "Point" {
                let mut error = validator::ValidationError::new("geometry_type");
                error.message = Some(format!("Unsupported geometry type '{}'", geometry_type).into());
                errors.add("geometry", error);
                return None;
            }
        }

        let coordinates = match &self.coordinates {
            Some(coordinates) => coordinates,
            None => {
                errors.add("coordinates", required_field_error());
                return None;
            }
        };

        if coordinates.len() != 2 {
            let mut error = validator::ValidationError::new("coordinates");
            error.message = Some("A Point needs exactly [longitude, latitude].".into());
            errors.add("coordinates", error);
            return None;
        }

        let (longitude, latitude) = (coordinates[0], coordinates[1]);
        let mut valid = true;
        if let Err(error) = validate_longitude(longitude) {
            errors.add("longitude", error);
            valid = false;
        }
        if let Err(error) = validate_latitude(latitude) {
            errors.add("latitude", error);
            valid = false;
        }

        valid.then(|| GeoPoint::new(longitude, latitude))
    }
}

impl LocationFeatureRequest {
    /// Valida el body y devuelve los cambios.
    ///
    /// Con `require_core` (create/PUT) name y geometry son obligatorios;
    /// sin él (PATCH) todo es opcional.
    pub fn validate_changes(self, require_core: bool) -> AppResult<LocationChanges> {
        let properties = self.properties.unwrap_or_default();
        let fields = LocationFields {
            name: properties.name.map(|v| v.trim().to_string()),
            description: properties.description.map(|v| v.trim().to_string()),
            address: properties.address.map(|v| v.trim().to_string()),
        };

        let mut errors = match fields.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(feature_type) = &self.feature_type {
            if feature_type != "Feature" {
                let mut error = validator::ValidationError::new("feature_type");
                error.message = Some(format!("Expected a 'Feature', got '{}'", feature_type).into());
                errors.add("type", error);
            }
        }

        if require_core && fields.name.is_none() {
            errors.add("name", required_field_error());
        }

        let point = match &self.geometry {
            Some(geometry) => geometry.to_point(&mut errors),
            None => {
                if require_core {
                    errors.add("geometry", required_field_error());
                }
                None
            }
        };

        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(LocationChanges {
            name: fields.name,
            description: fields.description,
            address: fields.address,
            point,
        })
    }

    /// Valida el body de creación y rellena los valores por defecto
    pub fn into_new_location(self) -> AppResult<NewLocation> {
        let changes = self.validate_changes(true)?;

        let (name, point) = match (changes.name, changes.point) {
            (Some(name), Some(point)) => (name, point),
            _ => return Err(AppError::Internal("validated body lost name or point".to_string())),
        };

        let mut location = NewLocation::new(name, point);
        if let Some(description) = changes.description {
            location = location.with_description(description);
        }
        if let Some(address) = changes.address {
            location = location.with_address(address);
        }
        Ok(location)
    }
}

// Response: geometría GeoJSON
#[derive(Debug, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: &'static str,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct LocationProperties {
    pub name: String,
    pub description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Response de detalle/creación/actualización (GeoJSON Feature)
#[derive(Debug, Serialize)]
pub struct LocationFeature {
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    pub id: i64,
    pub geometry: PointGeometry,
    pub properties: LocationProperties,
}

// Response de listado (plano, sin geometry)
#[derive(Debug, Serialize)]
pub struct LocationSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: &'static str,
    pub features: Vec<LocationFeature>,
}

impl From<Location> for LocationFeature {
    fn from(location: Location) -> Self {
        Self {
            feature_type: "Feature",
            id: location.id,
            geometry: PointGeometry {
                geometry_type: "Point",
                coordinates: location.point.coordinates(),
            },
            properties: LocationProperties {
                latitude: location.latitude(),
                longitude: location.longitude(),
                name: location.name,
                description: location.description,
                address: location.address,
                created_at: location.created_at,
                updated_at: location.updated_at,
            },
        }
    }
}

impl From<Location> for LocationSummary {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            latitude: location.latitude(),
            longitude: location.longitude(),
            name: location.name,
            description: location.description,
            address: location.address,
            created_at: location.created_at,
        }
    }
}

/// Forma de salida de una location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Feature,
    Summary,
}

/// Selección explícita de la forma de salida según la operación
pub fn representation_for(operation: Operation) -> Representation {
    match operation {
        Operation::List => Representation::Summary,
        Operation::Retrieve
        | Operation::Create
        | Operation::Update
        | Operation::PartialUpdate
        | Operation::Delete
        | Operation::Nearby
        | Operation::WithinBounds => Representation::Feature,
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LocationBody {
    Feature(LocationFeature),
    Summary(LocationSummary),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LocationCollectionBody {
    FeatureCollection(FeatureCollection),
    Summaries(Vec<LocationSummary>),
}

impl Representation {
    pub fn render(self, location: Location) -> LocationBody {
        match self {
            Representation::Feature => LocationBody::Feature(location.into()),
            Representation::Summary => LocationBody::Summary(location.into()),
        }
    }

    pub fn render_many(self, locations: Vec<Location>) -> LocationCollectionBody {
        match self {
            Representation::Feature => LocationCollectionBody::FeatureCollection(FeatureCollection {
                collection_type: "FeatureCollection",
                features: locations.into_iter().map(LocationFeature::from).collect(),
            }),
            Representation::Summary => LocationCollectionBody::Summaries(
                locations.into_iter().map(LocationSummary::from).collect(),
            ),
        }
    }
}

/// Conserva el orden por distancia de `nearby`
pub fn nearby_locations(matches: Vec<NearbyMatch>) -> Vec<Location> {
    matches.into_iter().map(|m| m.location).collect()
}
