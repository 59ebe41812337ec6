use std::sync::Arc;

use crate::dto::location_dto::{
    nearby_locations, representation_for, LocationBody, LocationCollectionBody, LocationFeatureRequest,
};
use crate::dto::pagination::{ListParams, PageRequest, Paginated};
use crate::middleware::auth::Caller;
use crate::models::Operation;
use crate::repositories::location_repository::{ListOrder, ListQuery, LocationFilter, LocationStore};
use crate::services::query_service::{BoundsParams, NearbyParams, QueryService};
use crate::utils::errors::AppResult;

/// Identificador del caller para los logs de auditoría
fn actor(caller: Option<&Caller>) -> String {
    caller
        .map(|c| c.user_id.to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}

pub struct LocationController {
    store: Arc<dyn LocationStore>,
}

impl LocationController {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        params: &ListParams,
        base_path: &str,
    ) -> AppResult<Paginated<LocationCollectionBody>> {
        let page = PageRequest::parse(params.page.as_deref())?;
        let search = params.search_term();
        let filter = match search {
            Some(term) => LocationFilter::Search(term.to_string()),
            None => LocationFilter::All,
        };

        let count = self.store.count(&filter).await?;
        page.ensure_exists(count)?;

        let locations = self
            .store
            .list(&ListQuery::new(filter, ListOrder::NewestFirst).sliced(page.offset(), page.size))
            .await?;

        let results = representation_for(Operation::List).render_many(locations);
        Ok(Paginated::new(results, count, page, base_path, search))
    }

    pub async fn retrieve(&self, id: i64) -> AppResult<LocationBody> {
        let location = self.store.get(id).await?;
        Ok(representation_for(Operation::Retrieve).render(location))
    }

    pub async fn create(
        &self,
        request: LocationFeatureRequest,
        caller: Option<&Caller>,
    ) -> AppResult<LocationBody> {
        let new_location = request.into_new_location()?;
        let location = self.store.insert(new_location).await?;

        log::info!("📍 Location {} creada por {}: {}", location.id, actor(caller), location);
        Ok(representation_for(Operation::Create).render(location))
    }

    /// PUT: name y geometry obligatorios, mismas reglas que create
    pub async fn replace(
        &self,
        id: i64,
        request: LocationFeatureRequest,
        caller: Option<&Caller>,
    ) -> AppResult<LocationBody> {
        self.store.get(id).await?;
        let changes = request.validate_changes(true)?;
        let location = self.store.update(id, changes).await?;

        log::info!("✏️ Location {} reemplazada por {}", id, actor(caller));
        Ok(representation_for(Operation::Update).render(location))
    }

    /// PATCH: solo se tocan los campos presentes
    pub async fn partial_update(
        &self,
        id: i64,
        request: LocationFeatureRequest,
        caller: Option<&Caller>,
    ) -> AppResult<LocationBody> {
        self.store.get(id).await?;
        let changes = request.validate_changes(false)?;
        if changes.is_empty() {
            log::debug!("✏️ PATCH sin cambios sobre location {}", id);
        }
        let location = self.store.update(id, changes).await?;

        log::info!("✏️ Location {} actualizada por {}", id, actor(caller));
        Ok(representation_for(Operation::PartialUpdate).render(location))
    }

    pub async fn delete(&self, id: i64, caller: Option<&Caller>) -> AppResult<()> {
        self.store.delete(id).await?;
        log::info!("🗑️ Location {} eliminada por {}", id, actor(caller));
        Ok(())
    }

    pub async fn nearby(&self, params: &NearbyParams) -> AppResult<LocationCollectionBody> {
        let matches = QueryService::new(self.store.clone()).nearby(params).await?;
        Ok(representation_for(Operation::Nearby).render_many(nearby_locations(matches)))
    }

    pub async fn within_bounds(&self, params: &BoundsParams) -> AppResult<LocationCollectionBody> {
        let locations = QueryService::new(self.store.clone()).within_bounds(params).await?;
        Ok(representation_for(Operation::WithinBounds).render_many(locations))
    }
}
