//! Repositorio de locations
//!
//! Define el contrato `LocationStore` y la implementación PostgreSQL/PostGIS.
//! Los filtros espaciales se evalúan de forma exacta en la base de datos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::geo::{haversine_distance, BoundingBox, EARTH_RADIUS_M};
use crate::models::location::{GeoPoint, Location, LocationChanges, NewLocation, WGS84_SRID};
use crate::utils::errors::{not_found_error, AppResult};

/// Filtro de lectura sobre el conjunto completo de locations
#[derive(Debug, Clone, PartialEq)]
pub enum LocationFilter {
    All,
    /// Búsqueda case-insensitive en name, description y address
    Search(String),
    /// Nombre exacto
    Name(String),
    /// Distancia Haversine al centro <= meters
    WithinRadius { center: GeoPoint, meters: f64 },
    WithinBounds(BoundingBox),
}

impl LocationFilter {
    /// Evalúa el filtro sobre un registro (misma semántica que el SQL)
    pub fn matches(&self, location: &Location) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Search(term) => {
                let term = term.to_lowercase();
                location.name.to_lowercase().contains(&term)
                    || location.description.to_lowercase().contains(&term)
                    || location.address.to_lowercase().contains(&term)
            }
            LocationFilter::Name(name) => location.name == *name,
            LocationFilter::WithinRadius { center, meters } => {
                haversine_distance(center, &location.point) <= *meters
            }
            LocationFilter::WithinBounds(bbox) => bbox.contains(&location.point),
        }
    }
}

/// Orden del listado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// created_at DESC, empates por id DESC (orden de inserción)
    NewestFirst,
    IdAscending,
}

/// Ventana de paginación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: LocationFilter,
    pub order: ListOrder,
    pub slice: Option<Slice>,
}

impl ListQuery {
    pub fn new(filter: LocationFilter, order: ListOrder) -> Self {
        Self { filter, order, slice: None }
    }

    pub fn sliced(mut self, offset: u64, limit: u64) -> Self {
        self.slice = Some(Slice { offset, limit });
        self
    }
}

/// Contrato del store de coordenadas
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn insert(&self, new: NewLocation) -> AppResult<Location>;

    async fn get(&self, id: i64) -> AppResult<Location>;

    async fn update(&self, id: i64, changes: LocationChanges) -> AppResult<Location>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn list(&self, query: &ListQuery) -> AppResult<Vec<Location>>;

    async fn count(&self, filter: &LocationFilter) -> AppResult<u64>;
}

#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    description: String,
    address: String,
    longitude: f64,
    latitude: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            address: row.address,
            point: GeoPoint::new(row.longitude, row.latitude),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escapa `\`, `%` y `_` para que ILIKE compare el término literalmente
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const SELECT_COLUMNS: &str = "id, name, description, address, \
     ST_X(point) AS longitude, ST_Y(point) AS latitude, created_at, updated_at";

pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Agrega la cláusula WHERE correspondiente al filtro
    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &LocationFilter) {
        match filter {
            LocationFilter::All => {}
            LocationFilter::Search(term) => {
                let pattern = format!("%{}%", escape_like(term));
                builder
                    .push(" WHERE (name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR description ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR address ILIKE ")
                    .push_bind(pattern)
                    .push(" ESCAPE '\\')");
            }
            LocationFilter::Name(name) => {
                builder.push(" WHERE name = ").push_bind(name.clone());
            }
            LocationFilter::WithinRadius { meters, .. } => {
                // Haversine con R = 6371000 m; `h.a` viene de push_from()
                builder
                    .push(" WHERE 2 * ")
                    .push_bind(EARTH_RADIUS_M)
                    .push(" * atan2(sqrt(h.a), sqrt(1 - h.a)) <= ")
                    .push_bind(*meters);
            }
            LocationFilter::WithinBounds(bbox) => {
                builder
                    .push(" WHERE ST_Y(point) >= ")
                    .push_bind(bbox.min_lat)
                    .push(" AND ST_Y(point) <= ")
                    .push_bind(bbox.max_lat)
                    .push(" AND ST_X(point) >= ")
                    .push_bind(bbox.min_lon)
                    .push(" AND ST_X(point) <= ")
                    .push_bind(bbox.max_lon);
            }
        }
    }

    /// FROM locations, con el término Haversine `h.a` si el filtro es por radio
    fn push_from(builder: &mut QueryBuilder<'_, Postgres>, filter: &LocationFilter) {
        builder.push(" FROM locations");
        if let LocationFilter::WithinRadius { center, .. } = filter {
            builder
                .push(
                    " CROSS JOIN LATERAL (SELECT LEAST(1.0, GREATEST(0.0, \
                     power(sin(radians(ST_Y(point) - ",
                )
                .push_bind(center.latitude)
                .push(") / 2), 2) + cos(radians(")
                .push_bind(center.latitude)
                .push(")) * cos(radians(ST_Y(point))) * power(sin(radians(ST_X(point) - ")
                .push_bind(center.longitude)
                .push(") / 2), 2))) AS a) h");
        }
    }

    fn push_order(builder: &mut QueryBuilder<'_, Postgres>, order: ListOrder) {
        match order {
            ListOrder::NewestFirst => builder.push(" ORDER BY created_at DESC, id DESC"),
            ListOrder::IdAscending => builder.push(" ORDER BY id ASC"),
        };
    }
}

#[async_trait]
impl LocationStore for PgLocationRepository {
    async fn insert(&self, new: NewLocation) -> AppResult<Location> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            INSERT INTO locations (name, description, address, point, created_at, updated_at)
            VALUES ($1, $2, $3, ST_SetSRID(ST_MakePoint($4, $5), {srid}), $6, $6)
            RETURNING {columns}
            "#,
            srid = new.point.srid(),
            columns = SELECT_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.address)
        .bind(new.point.longitude)
        .bind(new.point.latitude)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        log::debug!("💾 Location {} insertada: {}", row.id, row.name);
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> AppResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Location", &id.to_string()))?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, changes: LocationChanges) -> AppResult<Location> {
        let (longitude, latitude) = match changes.point {
            Some(point) => (Some(point.longitude), Some(point.latitude)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            UPDATE locations SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address),
                point = COALESCE(ST_SetSRID(ST_MakePoint($5, $6), {srid}), point),
                updated_at = $7
            WHERE id = $1
            RETURNING {columns}
            "#,
            srid = WGS84_SRID,
            columns = SELECT_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.address)
        .bind(longitude)
        .bind(latitude)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Location", &id.to_string()))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Location", &id.to_string()));
        }

        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Vec<Location>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(SELECT_COLUMNS);
        Self::push_from(&mut builder, &query.filter);
        Self::push_filter(&mut builder, &query.filter);
        Self::push_order(&mut builder, query.order);

        if let Some(slice) = query.slice {
            builder
                .push(" LIMIT ")
                .push_bind(slice.limit as i64)
                .push(" OFFSET ")
                .push_bind(slice.offset as i64);
        }

        let rows = builder
            .build_query_as::<LocationRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn count(&self, filter: &LocationFilter) -> AppResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        Self::push_from(&mut builder, filter);
        Self::push_filter(&mut builder, filter);

        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }
}
