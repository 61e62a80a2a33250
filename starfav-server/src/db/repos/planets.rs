//! Planet repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{NewPlanet, Planet};

/// Planet repository
pub struct PlanetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PlanetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Planet>, DbError> {
        let planets = sqlx::query_as::<_, Planet>(
            "SELECT id, name, diameter, gravity FROM planets ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(planets)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Planet>, DbError> {
        let planet = sqlx::query_as::<_, Planet>(
            "SELECT id, name, diameter, gravity FROM planets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(planet)
    }

    pub async fn create(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        let created = sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (name, diameter, gravity)
            VALUES ($1, $2, $3)
            RETURNING id, name, diameter, gravity
            "#,
        )
        .bind(&planet.name)
        .bind(planet.diameter)
        .bind(&planet.gravity)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
