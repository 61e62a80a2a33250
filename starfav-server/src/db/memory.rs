//! In-process catalog
//!
//! Same contract as the PostgreSQL adapter, held behind a `RwLock`.
//! Ids start at 1 and increase by one per insert.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::catalog::Catalog;
use super::repos::DbError;
use crate::models::{
    AddOutcome, DuplicatePolicy, FavoriteTarget, NewPerson, NewPlanet, NewUser, Person, Planet,
    User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    people: Vec<Person>,
    planets: Vec<Planet>,
    /// (user_id, target) in insertion order
    favorites: Vec<(i32, FavoriteTarget)>,
}

impl Tables {
    fn next_id(len: usize) -> Result<i32, DbError> {
        i32::try_from(len + 1).map_err(|_| DbError::Conflict("id space exhausted".to_owned()))
    }

    fn targets_of(&self, user_id: i32) -> impl Iterator<Item = FavoriteTarget> + '_ {
        self.favorites
            .iter()
            .filter(move |(user, _)| *user == user_id)
            .map(|(_, target)| *target)
    }
}

/// Catalog kept entirely in memory; contents are lost on drop.
#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DbError::Conflict(format!(
                "a user with email '{}' already exists",
                user.email
            )));
        }
        let created = user.into_user(Tables::next_id(tables.users.len())?);
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list_people(&self) -> Result<Vec<Person>, DbError> {
        Ok(self.tables.read().await.people.clone())
    }

    async fn get_person(&self, id: i32) -> Result<Option<Person>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.people.iter().find(|p| p.id == id).cloned())
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, DbError> {
        let mut tables = self.tables.write().await;
        let created = person.into_person(Tables::next_id(tables.people.len())?);
        tables.people.push(created.clone());
        Ok(created)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        Ok(self.tables.read().await.planets.clone())
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.planets.iter().find(|p| p.id == id).cloned())
    }

    async fn create_planet(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        let mut tables = self.tables.write().await;
        let created = planet.into_planet(Tables::next_id(tables.planets.len())?);
        tables.planets.push(created.clone());
        Ok(created)
    }

    async fn favorite_people(&self, user_id: i32) -> Result<Vec<Person>, DbError> {
        let tables = self.tables.read().await;
        let people = tables
            .targets_of(user_id)
            .filter_map(|target| match target {
                FavoriteTarget::Person(id) => tables.people.iter().find(|p| p.id == id).cloned(),
                FavoriteTarget::Planet(_) => None,
            })
            .collect();
        Ok(people)
    }

    async fn favorite_planets(&self, user_id: i32) -> Result<Vec<Planet>, DbError> {
        let tables = self.tables.read().await;
        let planets = tables
            .targets_of(user_id)
            .filter_map(|target| match target {
                FavoriteTarget::Planet(id) => tables.planets.iter().find(|p| p.id == id).cloned(),
                FavoriteTarget::Person(_) => None,
            })
            .collect();
        Ok(planets)
    }

    async fn add_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome, DbError> {
        let mut tables = self.tables.write().await;
        let exists = tables.favorites.contains(&(user_id, target));
        if exists && policy.skips_existing() {
            return Ok(AddOutcome::AlreadyPresent);
        }
        tables.favorites.push((user_id, target));
        Ok(AddOutcome::Added)
    }

    async fn remove_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        match tables.favorites.iter().position(|link| *link == (user_id, target)) {
            Some(index) => {
                tables.favorites.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
