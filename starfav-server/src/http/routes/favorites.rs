//! Favorite endpoints
//!
//! `/user/{user_id}/favorite/{kind}/{id}` acts on the given user.
//! `/favorite/{kind}/{id}` acts on the configured default user.
//!
//! Every mutation checks the user, then the target, before touching the
//! association; either missing is a 404.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidUserAndId};
use crate::http::server::AppState;
use crate::models::{AddOutcome, DuplicatePolicy, FavoriteTarget, Person, Planet};

const PLANET_ADDED: &str = "Your favorite planet has been added correctly :)";
const PLANET_REMOVED: &str = "Your favorite planet has been deleted correctly :(";
const PERSON_ADDED: &str = "Your favorite character has been added correctly :)";
const PERSON_REMOVED: &str = "Your favorite character has been deleted correctly :(";

/// Response after a planet favorite changed
#[derive(Serialize)]
pub struct PlanetFavoritesResponse {
    pub msg: &'static str,
    #[serde(rename = "PlanetsFav")]
    pub planets: Vec<Planet>,
}

/// Response after a person favorite changed
#[derive(Serialize)]
pub struct PeopleFavoritesResponse {
    pub msg: &'static str,
    #[serde(rename = "PeopleFav")]
    pub people: Vec<Person>,
}

async fn ensure_exists(
    state: &AppState,
    user_id: i32,
    target: FavoriteTarget,
) -> Result<(), ApiError> {
    if state.catalog.get_user(user_id).await?.is_none() {
        return Err(ApiError::NotFound {
            resource: "user",
            id: user_id,
        });
    }

    let found = match target {
        FavoriteTarget::Person(id) => state.catalog.get_person(id).await?.is_some(),
        FavoriteTarget::Planet(id) => state.catalog.get_planet(id).await?.is_some(),
    };
    if !found {
        return Err(ApiError::NotFound {
            resource: target.resource(),
            id: target.id(),
        });
    }

    Ok(())
}

async fn add(state: &AppState, user_id: i32, target: FavoriteTarget) -> Result<(), ApiError> {
    ensure_exists(state, user_id, target).await?;

    let policy = state.favorites.duplicates;
    let outcome = state.catalog.add_favorite(user_id, target, policy).await?;
    if outcome == AddOutcome::AlreadyPresent && policy == DuplicatePolicy::Reject {
        return Err(ApiError::Conflict {
            message: format!(
                "{} {} is already a favorite of user {}",
                target.resource(),
                target.id(),
                user_id
            ),
        });
    }

    tracing::info!(user_id, ?target, ?outcome, "favorite added");
    Ok(())
}

async fn remove(state: &AppState, user_id: i32, target: FavoriteTarget) -> Result<(), ApiError> {
    ensure_exists(state, user_id, target).await?;

    if !state.catalog.remove_favorite(user_id, target).await? {
        return Err(ApiError::NotFavorited {
            resource: target.resource(),
            id: target.id(),
            user_id,
        });
    }

    tracing::info!(user_id, ?target, "favorite removed");
    Ok(())
}

async fn planets_after(
    state: &AppState,
    msg: &'static str,
    user_id: i32,
) -> Result<Json<PlanetFavoritesResponse>, ApiError> {
    let planets = state.catalog.favorite_planets(user_id).await?;
    Ok(Json(PlanetFavoritesResponse { msg, planets }))
}

async fn people_after(
    state: &AppState,
    msg: &'static str,
    user_id: i32,
) -> Result<Json<PeopleFavoritesResponse>, ApiError> {
    let people = state.catalog.favorite_people(user_id).await?;
    Ok(Json(PeopleFavoritesResponse { msg, people }))
}

/// POST /user/{user_id}/favorite/planets/{id}
async fn add_planet(
    State(state): State<Arc<AppState>>,
    ValidUserAndId(user_id, id): ValidUserAndId,
) -> Result<Json<PlanetFavoritesResponse>, ApiError> {
    add(&state, user_id, FavoriteTarget::Planet(id)).await?;
    planets_after(&state, PLANET_ADDED, user_id).await
}

/// DELETE /user/{user_id}/favorite/planets/{id}
async fn remove_planet(
    State(state): State<Arc<AppState>>,
    ValidUserAndId(user_id, id): ValidUserAndId,
) -> Result<Json<PlanetFavoritesResponse>, ApiError> {
    remove(&state, user_id, FavoriteTarget::Planet(id)).await?;
    planets_after(&state, PLANET_REMOVED, user_id).await
}

/// POST /user/{user_id}/favorite/people/{id}
async fn add_person(
    State(state): State<Arc<AppState>>,
    ValidUserAndId(user_id, id): ValidUserAndId,
) -> Result<Json<PeopleFavoritesResponse>, ApiError> {
    add(&state, user_id, FavoriteTarget::Person(id)).await?;
    people_after(&state, PERSON_ADDED, user_id).await
}

/// DELETE /user/{user_id}/favorite/people/{id}
async fn remove_person(
    State(state): State<Arc<AppState>>,
    ValidUserAndId(user_id, id): ValidUserAndId,
) -> Result<Json<PeopleFavoritesResponse>, ApiError> {
    remove(&state, user_id, FavoriteTarget::Person(id)).await?;
    people_after(&state, PERSON_REMOVED, user_id).await
}

/// POST /favorite/planets/{id}
async fn add_default_planet(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PlanetFavoritesResponse>, ApiError> {
    let user_id = state.favorites.default_user_id;
    add(&state, user_id, FavoriteTarget::Planet(id)).await?;
    planets_after(&state, PLANET_ADDED, user_id).await
}

/// DELETE /favorite/planets/{id}
async fn remove_default_planet(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PlanetFavoritesResponse>, ApiError> {
    let user_id = state.favorites.default_user_id;
    remove(&state, user_id, FavoriteTarget::Planet(id)).await?;
    planets_after(&state, PLANET_REMOVED, user_id).await
}

/// POST /favorite/people/{id}
async fn add_default_person(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PeopleFavoritesResponse>, ApiError> {
    let user_id = state.favorites.default_user_id;
    add(&state, user_id, FavoriteTarget::Person(id)).await?;
    people_after(&state, PERSON_ADDED, user_id).await
}

/// DELETE /favorite/people/{id}
async fn remove_default_person(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PeopleFavoritesResponse>, ApiError> {
    let user_id = state.favorites.default_user_id;
    remove(&state, user_id, FavoriteTarget::Person(id)).await?;
    people_after(&state, PERSON_REMOVED, user_id).await
}

/// Favorite routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/user/{user_id}/favorite/planets/{id}",
            post(add_planet).delete(remove_planet),
        )
        .route(
            "/user/{user_id}/favorite/people/{id}",
            post(add_person).delete(remove_person),
        )
        .route(
            "/favorite/planets/{id}",
            post(add_default_planet).delete(remove_default_planet),
        )
        .route(
            "/favorite/people/{id}",
            post(add_default_person).delete(remove_default_person),
        )
}
