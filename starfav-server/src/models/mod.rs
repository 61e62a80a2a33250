//! Domain models with validation at construction
//!
//! Request bodies are read into loosely typed structs and converted to
//! `New*` payloads with `TryFrom`. Invalid input returns ValidationError,
//! not panic.

pub mod favorites;
pub mod person;
pub mod planet;
pub mod user;
pub mod validation;

pub use favorites::{AddOutcome, DuplicatePolicy, FavoriteTarget, Favorites, ParsePolicyError};
pub use person::{CreatePersonRequest, NewPerson, Person};
pub use planet::{CreatePlanetRequest, NewPlanet, Planet};
pub use user::{CreateUserRequest, NewUser, User};
pub use validation::ValidationError;
