//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::MessageBody;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{CreateUserRequest, Favorites, NewUser, User};

/// GET /user - greeting kept for clients that probe it
async fn hello() -> Json<MessageBody> {
    Json(MessageBody::new("Hello, this is your GET /user response "))
}

/// GET /users - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.catalog.list_users().await?))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = NewUser::try_from(req)?;
    let created = state.catalog.create_user(user).await?;
    tracing::info!(id = created.id, "user created");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/users/{}", created.id))],
        Json(MessageBody::new("User added correctly!")),
    ))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<User>, ApiError> {
    let user = state
        .catalog
        .get_user(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "user", id })?;

    Ok(Json(user))
}

/// GET /user/{user_id}/favorites - both favorite lists of a user
async fn get_favorites(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Favorites>, ApiError> {
    if state.catalog.get_user(id).await?.is_none() {
        return Err(ApiError::NotFound { resource: "user", id });
    }

    let people = state.catalog.favorite_people(id).await?;
    let planets = state.catalog.favorite_planets(id).await?;

    Ok(Json(Favorites { people, planets }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", get(hello))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/user/{user_id}/favorites", get(get_favorites))
}
