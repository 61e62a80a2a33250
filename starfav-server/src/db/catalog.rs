//! Storage port used by the HTTP handlers
//!
//! `PgCatalog` is the production adapter; `MemoryCatalog` (see
//! [`super::memory`]) backs tests and database-less local runs.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{DbError, FavoriteRepo, PersonRepo, PlanetRepo, UserRepo};
use super::{create_pool, schema};
use crate::models::{
    AddOutcome, DuplicatePolicy, FavoriteTarget, NewPerson, NewPlanet, NewUser, Person, Planet,
    User,
};

/// Persistence operations for users, the catalog and favorites.
///
/// Lookups by id return `Ok(None)` for absent rows. Favorite mutations do
/// not check that the user or target exist; callers do that first.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Short adapter name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn list_users(&self) -> Result<Vec<User>, DbError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError>;
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    async fn list_people(&self) -> Result<Vec<Person>, DbError>;
    async fn get_person(&self, id: i32) -> Result<Option<Person>, DbError>;
    async fn create_person(&self, person: NewPerson) -> Result<Person, DbError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError>;
    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError>;
    async fn create_planet(&self, planet: NewPlanet) -> Result<Planet, DbError>;

    async fn favorite_people(&self, user_id: i32) -> Result<Vec<Person>, DbError>;
    async fn favorite_planets(&self, user_id: i32) -> Result<Vec<Planet>, DbError>;

    /// Link `user_id` to `target` under the given duplicate policy.
    async fn add_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome, DbError>;

    /// Remove one link for the pair; false when there was none.
    async fn remove_favorite(&self, user_id: i32, target: FavoriteTarget)
        -> Result<bool, DbError>;
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = create_pool(database_url).await?;
        schema::ensure(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        UserRepo::new(&self.pool).list().await
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError> {
        UserRepo::new(&self.pool).get(id).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        UserRepo::new(&self.pool).create(user).await
    }

    async fn list_people(&self) -> Result<Vec<Person>, DbError> {
        PersonRepo::new(&self.pool).list().await
    }

    async fn get_person(&self, id: i32) -> Result<Option<Person>, DbError> {
        PersonRepo::new(&self.pool).get(id).await
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, DbError> {
        PersonRepo::new(&self.pool).create(person).await
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        PlanetRepo::new(&self.pool).list().await
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError> {
        PlanetRepo::new(&self.pool).get(id).await
    }

    async fn create_planet(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        PlanetRepo::new(&self.pool).create(planet).await
    }

    async fn favorite_people(&self, user_id: i32) -> Result<Vec<Person>, DbError> {
        FavoriteRepo::new(&self.pool).people(user_id).await
    }

    async fn favorite_planets(&self, user_id: i32) -> Result<Vec<Planet>, DbError> {
        FavoriteRepo::new(&self.pool).planets(user_id).await
    }

    async fn add_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome, DbError> {
        FavoriteRepo::new(&self.pool).add(user_id, target, policy).await
    }

    async fn remove_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<bool, DbError> {
        FavoriteRepo::new(&self.pool).remove(user_id, target).await
    }
}
