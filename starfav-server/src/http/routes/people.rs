//! People endpoints

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
use crate::models::{CreatePersonRequest, NewPerson, Person};

/// GET /people - list all people
async fn list_people(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.catalog.list_people().await?))
}

/// POST /people - create a person
///
/// The new id is reported through the `Location` header.
async fn create_person(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person = NewPerson::try_from(req)?;
    let created = state.catalog.create_person(person).await?;
    tracing::info!(id = created.id, name = %created.name, "person created");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/people/{}", created.id))],
        Json(MessageBody::new("Character added correctly!")),
    ))
}

/// GET /people/{id} - get a single person
async fn get_person(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ResultBody<Person>>, ApiError> {
    let person = state
        .catalog
        .get_person(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "character",
            id,
        })?;

    Ok(Json(ResultBody { result: person }))
}

/// People routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/people", get(list_people).post(create_person))
        .route("/people/{id}", get(get_person))
}
