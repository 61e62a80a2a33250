//! Database layer - connection pool, schema, repositories and the
//! `Catalog` storage port
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Favorite lists use JOINs - no N+1 queries
//! - One statement per mutation, committed on return

pub mod catalog;
pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;

pub use catalog::{Catalog, PgCatalog};
pub use memory::MemoryCatalog;
pub use pool::create_pool;
pub use repos::DbError;
