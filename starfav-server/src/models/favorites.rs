//! Favorite associations and the duplicate policy

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{Person, Planet};

/// Both favorite lists of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorites {
    #[serde(rename = "PeopleFav")]
    pub people: Vec<Person>,
    #[serde(rename = "PlanetsFav")]
    pub planets: Vec<Planet>,
}

/// Catalog entity a favorite points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Person(i32),
    Planet(i32),
}

impl FavoriteTarget {
    pub fn id(&self) -> i32 {
        match self {
            Self::Person(id) | Self::Planet(id) => *id,
        }
    }

    /// Resource name used in logs and error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Person(_) => "character",
            Self::Planet(_) => "planet",
        }
    }
}

/// Result of an add-favorite call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The pair was already favorited and nothing was written
    AlreadyPresent,
}

/// How a repeated favorite of the same (user, entity) pair is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Favorites form a set; a repeated add is a successful no-op
    #[default]
    Dedupe,
    /// Every add stores a new association
    Allow,
    /// A repeated add is refused with a conflict
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dedupe => "dedupe",
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }

    /// Whether storage should skip the insert when the pair exists.
    pub fn skips_existing(&self) -> bool {
        !matches!(self, Self::Allow)
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown duplicate policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown duplicate policy '{0}' (expected dedupe, allow or reject)")]
pub struct ParsePolicyError(String);

impl FromStr for DuplicatePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dedupe" => Ok(Self::Dedupe),
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}
