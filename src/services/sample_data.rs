//! Datos de ejemplo: cuatro landmarks de Nueva York

use crate::models::location::{GeoPoint, Location, NewLocation};
use crate::repositories::location_repository::{ListOrder, ListQuery, LocationFilter, LocationStore};
use crate::utils::errors::AppResult;

pub struct SampleLocation {
    pub name: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub longitude: f64,
    pub latitude: f64,
}

pub const SAMPLE_LOCATIONS: [SampleLocation; 4] = [
    SampleLocation {
        name: "Statue of Liberty",
        description: "Iconic statue in New York Harbor",
        address: "Liberty Island, New York, NY 10004",
        longitude: -74.0445,
        latitude: 40.6892,
    },
    SampleLocation {
        name: "Empire State Building",
        description: "102-story Art Deco skyscraper",
        address: "20 W 34th St, New York, NY 10001",
        longitude: -73.9857,
        latitude: 40.7484,
    },
    SampleLocation {
        name: "Central Park",
        description: "Urban park in Manhattan",
        address: "New York, NY",
        longitude: -73.9654,
        latitude: 40.7829,
    },
    SampleLocation {
        name: "Brooklyn Bridge",
        description: "Historic hybrid cable-stayed/suspension bridge",
        address: "New York, NY 10038",
        longitude: -73.9969,
        latitude: 40.7061,
    },
];

impl SampleLocation {
    fn to_new_location(&self) -> NewLocation {
        NewLocation::new(self.name, GeoPoint::new(self.longitude, self.latitude))
            .with_description(self.description)
            .with_address(self.address)
    }
}

/// Resultado de get-or-create
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Created(Location),
    AlreadyExists(Location),
}

/// Busca por nombre exacto y crea la location solo si no existe
pub async fn get_or_create(store: &dyn LocationStore, new: NewLocation) -> AppResult<LoadOutcome> {
    let existing = store
        .list(&ListQuery::new(LocationFilter::Name(new.name.clone()), ListOrder::IdAscending).sliced(0, 1))
        .await?;

    match existing.into_iter().next() {
        Some(location) => Ok(LoadOutcome::AlreadyExists(location)),
        None => Ok(LoadOutcome::Created(store.insert(new).await?)),
    }
}

pub async fn load_sample_locations(store: &dyn LocationStore) -> AppResult<Vec<LoadOutcome>> {
    let mut outcomes = Vec::with_capacity(SAMPLE_LOCATIONS.len());

    for sample in &SAMPLE_LOCATIONS {
        let outcome = get_or_create(store, sample.to_new_location()).await?;
        match &outcome {
            LoadOutcome::Created(location) => log::info!("✅ Created location: {}", location),
            LoadOutcome::AlreadyExists(location) => {
                log::warn!("⚠️ Location already exists: {}", location)
            }
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_repository::InMemoryLocationRepository;

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let store = InMemoryLocationRepository::new();

        let first = load_sample_locations(&store).await.unwrap();
        assert!(first.iter().all(|o| matches!(o, LoadOutcome::Created(_))));

        let second = load_sample_locations(&store).await.unwrap();
        assert!(second.iter().all(|o| matches!(o, LoadOutcome::AlreadyExists(_))));
        assert_eq!(store.count(&LocationFilter::All).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_sample_fields() {
        let store = InMemoryLocationRepository::new();
        load_sample_locations(&store).await.unwrap();

        let found = store
            .list(&ListQuery::new(LocationFilter::Name("Empire State Building".to_string()), ListOrder::IdAscending))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].address, "20 W 34th St, New York, NY 10001");
        assert_eq!(found[0].point, GeoPoint::new(-73.9857, 40.7484));
    }
}
