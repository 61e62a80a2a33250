//! Person catalog entity

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{required_label, required_string, ValidationError};

/// Person record as stored and serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
}

/// Validated insert payload for a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
}

impl NewPerson {
    /// Attach a storage id.
    pub fn into_person(self, id: i32) -> Person {
        Person {
            id,
            name: self.name,
            birth_year: self.birth_year,
            eye_color: self.eye_color,
        }
    }
}

/// `POST /people` body before validation
#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonRequest {
    pub name: Option<Value>,
    pub birth_year: Option<Value>,
    pub eye_color: Option<Value>,
}

impl TryFrom<CreatePersonRequest> for NewPerson {
    type Error = ValidationError;

    fn try_from(req: CreatePersonRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_string("name", req.name)?,
            birth_year: required_label("birth_year", req.birth_year)?,
            eye_color: required_string("eye_color", req.eye_color)?,
        })
    }
}
