//! User identity record

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{optional_string, required_string, ValidationError};

/// User record as stored and serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
}

/// Validated insert payload for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
}

impl NewUser {
    /// Attach a storage id. New users start active.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
            is_active: true,
        }
    }
}

/// `POST /users` body before validation
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<Value>,
    pub name: Option<Value>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: required_string("email", req.email)?,
            name: optional_string("name", req.name)?,
        })
    }
}
