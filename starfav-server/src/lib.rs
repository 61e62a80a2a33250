//! starfav-server: people/planets catalog with per-user favorites
//!
//! Exposes the catalog over a JSON HTTP API backed by PostgreSQL, or by
//! an in-memory store when no database is configured.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{normalize_database_url, FavoritesConfig};
pub use db::{Catalog, DbError, MemoryCatalog, PgCatalog};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
