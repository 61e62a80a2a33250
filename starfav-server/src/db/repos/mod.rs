//! Repository implementations for PostgreSQL access
//!
//! One repository per table family. Lookups by id return `Option`;
//! every mutation is a single statement.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;

pub use favorites::FavoriteRepo;
pub use people::PersonRepo;
pub use planets::PlanetRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: {0}")]
    Conflict(String),
}
