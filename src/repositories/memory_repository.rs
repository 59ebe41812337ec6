//! Store de locations en memoria
//!
//! Mismo contrato que el repositorio PostgreSQL. Se usa con
//! `STORAGE_BACKEND=memory` (desarrollo) y en los tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::location::{Location, LocationChanges, NewLocation};
use crate::repositories::location_repository::{ListOrder, ListQuery, LocationFilter, LocationStore};
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Default)]
struct Inner {
    next_id: i64,
    records: BTreeMap<i64, Location>,
}

#[derive(Default)]
pub struct InMemoryLocationRepository {
    inner: RwLock<Inner>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationRepository {
    async fn insert(&self, new: NewLocation) -> AppResult<Location> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let now = Utc::now();
        let location = Location {
            id: inner.next_id,
            name: new.name,
            description: new.description,
            address: new.address,
            point: new.point,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(location.id, location.clone());

        log::debug!("💾 Location {} insertada en memoria: {}", location.id, location.name);
        Ok(location)
    }

    async fn get(&self, id: i64) -> AppResult<Location> {
        self.inner
            .read()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Location", &id.to_string()))
    }

    async fn update(&self, id: i64, changes: LocationChanges) -> AppResult<Location> {
        let mut inner = self.inner.write().await;
        let location = inner
            .records
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Location", &id.to_string()))?;

        changes.apply_to(location, Utc::now());
        Ok(location.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.inner
            .write()
            .await
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Location", &id.to_string()))
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Vec<Location>> {
        let inner = self.inner.read().await;

        // BTreeMap itera en orden de id (= orden de inserción)
        let mut locations: Vec<Location> = inner
            .records
            .values()
            .filter(|location| query.filter.matches(location))
            .cloned()
            .collect();

        if query.order == ListOrder::NewestFirst {
            locations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }

        if let Some(slice) = query.slice {
            locations = locations
                .into_iter()
                .skip(slice.offset as usize)
                .take(slice.limit as usize)
                .collect();
        }

        Ok(locations)
    }

    async fn count(&self, filter: &LocationFilter) -> AppResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.records.values().filter(|location| filter.matches(location)).count() as u64)
    }
}
