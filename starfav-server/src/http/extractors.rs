//! Custom Axum extractors

use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::ValidationError;

fn field_name(key: &str) -> &'static str {
    match key {
        "user_id" => "user_id",
        _ => "id",
    }
}

fn not_an_integer(field: &'static str) -> ApiError {
    ApiError::Validation(ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    })
}

fn parse_id(field: &'static str, raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| not_an_integer(field))
}

/// Captured segments as `(name, raw value)` pairs in route order
async fn path_params<S>(parts: &mut Parts, state: &S) -> Result<Vec<(String, String)>, ApiError>
where
    S: Send + Sync,
{
    match Path::<Vec<(String, String)>>::from_request_parts(parts, state).await {
        Ok(Path(params)) => Ok(params),
        Err(PathRejection::FailedToDeserializePathParams(e)) => match e.kind() {
            // Undecodable segment, e.g. `%FF`
            ErrorKind::InvalidUtf8InPathParam { key } => Err(not_an_integer(field_name(key))),
            _ => Err(not_an_integer("id")),
        },
        Err(_) => Err(not_an_integer("id")),
    }
}

fn lookup(params: &[(String, String)], field: &'static str) -> Result<i32, ApiError> {
    let (_, raw) = params
        .iter()
        .find(|(key, _)| key == field)
        .ok_or(ApiError::Validation(ValidationError::Missing { field }))?;

    parse_id(field, raw)
}

/// Extract an integer id from a single-parameter path
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        let (key, raw) = params
            .first()
            .ok_or(ApiError::Validation(ValidationError::Missing { field: "id" }))?;

        Ok(Self(parse_id(field_name(key), raw)?))
    }
}

/// Extract `(user_id, id)` from `/user/{user_id}/.../{id}` paths
pub struct ValidUserAndId(pub i32, pub i32);

impl<S> FromRequestParts<S> for ValidUserAndId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;

        Ok(Self(lookup(&params, "user_id")?, lookup(&params, "id")?))
    }
}

/// JSON body extractor whose rejections render as 400 `{"message": ...}`
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
