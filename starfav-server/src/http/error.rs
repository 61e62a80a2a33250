//! API error type with IntoResponse
//!
//! Every error renders as `{"message": <text>}` with the variant's status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body or path failed validation (400)
    Validation(ValidationError),

    /// Body could not be read as JSON (400)
    BadRequest { message: String },

    /// Entity absent (404)
    NotFound { resource: &'static str, id: i32 },

    /// Entity exists but is not in the user's favorites (404)
    NotFavorited {
        resource: &'static str,
        id: i32,
        user_id: i32,
    },

    /// No route matches the request (404)
    NoRoute { method: String, path: String },

    /// Path exists but not for this method (405)
    MethodNotAllowed { method: String, path: String },

    /// Write refused because of existing state (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::NotFavorited { .. } | Self::NoRoute { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side failures stay generic.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { message } | Self::Conflict { message } => message.clone(),
            Self::NotFound { resource, .. } => {
                format!("The {} you are looking for does not exist.", resource)
            }
            Self::NotFavorited {
                resource,
                id,
                user_id,
            } => format!("{} {} is not a favorite of user {}", resource, id, user_id),
            Self::NoRoute { method, path } => format!("no route for {} {}", method, path),
            Self::MethodNotAllowed { method, path } => {
                format!("method {} not allowed for {}", method, path)
            }
            Self::Database(_) | Self::Internal { .. } => "internal server error".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
            _ => tracing::debug!(status = %self.status(), "{}", self.message()),
        }

        let body = json!({ "message": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict(message) => Self::Conflict { message },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) =
            body_of(ApiError::Validation(ValidationError::Missing { field: "name" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "missing required field 'name'"}));
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_of(ApiError::NotFound {
            resource: "planet",
            id: 1,
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "The planet you are looking for does not exist."
        );
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let (status, body) = body_of(ApiError::MethodNotAllowed {
            method: "PUT".into(),
            path: "/people".into(),
        })
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["message"], "method PUT not allowed for /people");
    }

    #[tokio::test]
    async fn conflict_from_db_is_409() {
        let err = ApiError::from(DbError::Conflict("taken".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "taken");
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "internal server error"}));
    }
}
