//! Planet endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::{MessageBody, ResultBody};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{CreatePlanetRequest, NewPlanet, Planet};

/// GET /planets - list all planets
async fn list_planets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Planet>>, ApiError> {
    Ok(Json(state.catalog.list_planets().await?))
}

/// POST /planets - create a planet
async fn create_planet(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePlanetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let planet = NewPlanet::try_from(req)?;
    let created = state.catalog.create_planet(planet).await?;
    tracing::info!(id = created.id, name = %created.name, "planet created");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/planets/{}", created.id))],
        Json(MessageBody::new("Planet added correctly!")),
    ))
}

/// GET /planets/{id} - get a single planet
async fn get_planet(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ResultBody<Planet>>, ApiError> {
    let planet = state
        .catalog
        .get_planet(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "planet",
            id,
        })?;

    Ok(Json(ResultBody { result: planet }))
}

/// Planet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/planets", get(list_planets).post(create_planet))
        .route("/planets/{id}", get(get_planet))
}
