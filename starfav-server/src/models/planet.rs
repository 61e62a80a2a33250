//! Planet catalog entity

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{required_integer, required_label, required_string, ValidationError};

/// Planet record as stored and serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub diameter: i64,
    pub gravity: String,
}

/// Validated insert payload for a planet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlanet {
    pub name: String,
    pub diameter: i64,
    pub gravity: String,
}

impl NewPlanet {
    /// Attach a storage id.
    pub fn into_planet(self, id: i32) -> Planet {
        Planet {
            id,
            name: self.name,
            diameter: self.diameter,
            gravity: self.gravity,
        }
    }
}

/// `POST /planets` body before validation
#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanetRequest {
    pub name: Option<Value>,
    pub diameter: Option<Value>,
    pub gravity: Option<Value>,
}

impl TryFrom<CreatePlanetRequest> for NewPlanet {
    type Error = ValidationError;

    fn try_from(req: CreatePlanetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_string("name", req.name)?,
            diameter: required_integer("diameter", req.diameter)?,
            gravity: required_label("gravity", req.gravity)?,
        })
    }
}
