use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::location_controller::LocationController;
use crate::dto::location_dto::{LocationBody, LocationCollectionBody, LocationFeatureRequest};
use crate::dto::pagination::{ListParams, Paginated};
use crate::middleware::auth::Caller;
use crate::models::Operation;
use crate::services::query_service::{BoundsParams, NearbyParams};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub const LOCATIONS_PATH: &str = "/api/locations";

/// Rutas de locations, registradas con y sin barra final
pub fn create_location_router() -> Router<AppState> {
    let mut router = Router::new();

    for suffix in ["", "/"] {
        router = router
            .route(
                &format!("{}{}", LOCATIONS_PATH, suffix),
                get(list_locations).post(create_location),
            )
            .route(&format!("{}/nearby{}", LOCATIONS_PATH, suffix), get(nearby_locations))
            .route(
                &format!("{}/within_bounds{}", LOCATIONS_PATH, suffix),
                get(locations_within_bounds),
            )
            .route(
                &format!("{}/:id{}", LOCATIONS_PATH, suffix),
                get(get_location)
                    .put(replace_location)
                    .patch(update_location)
                    .delete(delete_location),
            );
    }

    router
}

fn controller(state: &AppState) -> LocationController {
    LocationController::new(state.store.clone())
}

/// Un id no numérico no puede existir: 404
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| not_found_error("Location", raw))
}

fn json_body(
    payload: Result<Json<LocationFeatureRequest>, JsonRejection>,
) -> Result<LocationFeatureRequest, AppError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn list_locations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<LocationCollectionBody>>, AppError> {
    let base_path = format!("{}/", LOCATIONS_PATH);
    let response = controller(&state).list(&params, &base_path).await?;
    Ok(Json(response))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LocationBody>, AppError> {
    let response = controller(&state).retrieve(parse_id(&id)?).await?;
    Ok(Json(response))
}

async fn create_location(
    State(state): State<AppState>,
    caller: Option<Extension<Caller>>,
    payload: Result<Json<LocationFeatureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LocationBody>), AppError> {
    let caller = caller.map(|Extension(c)| c);
    state.policy.authorize(caller.as_ref(), Operation::Create)?;

    let response = controller(&state)
        .create(json_body(payload)?, caller.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn replace_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Option<Extension<Caller>>,
    payload: Result<Json<LocationFeatureRequest>, JsonRejection>,
) -> Result<Json<LocationBody>, AppError> {
    let caller = caller.map(|Extension(c)| c);
    state.policy.authorize(caller.as_ref(), Operation::Update)?;

    let id = parse_id(&id)?;
    let response = controller(&state)
        .replace(id, json_body(payload)?, caller.as_ref())
        .await?;
    Ok(Json(response))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Option<Extension<Caller>>,
    payload: Result<Json<LocationFeatureRequest>, JsonRejection>,
) -> Result<Json<LocationBody>, AppError> {
    let caller = caller.map(|Extension(c)| c);
    state.policy.authorize(caller.as_ref(), Operation::PartialUpdate)?;

    let id = parse_id(&id)?;
    let response = controller(&state)
        .partial_update(id, json_body(payload)?, caller.as_ref())
        .await?;
    Ok(Json(response))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Option<Extension<Caller>>,
) -> Result<StatusCode, AppError> {
    let caller = caller.map(|Extension(c)| c);
    state.policy.authorize(caller.as_ref(), Operation::Delete)?;

    controller(&state).delete(parse_id(&id)?, caller.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn nearby_locations(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<LocationCollectionBody>, AppError> {
    let response = controller(&state).nearby(&params).await?;
    Ok(Json(response))
}

async fn locations_within_bounds(
    State(state): State<AppState>,
    Query(params): Query<BoundsParams>,
) -> Result<Json<LocationCollectionBody>, AppError> {
    let response = controller(&state).within_bounds(&params).await?;
    Ok(Json(response))
}
