//! Person repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{NewPerson, Person};

/// Person repository
pub struct PersonRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Person>, DbError> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT id, name, birth_year, eye_color FROM people ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(people)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Person>, DbError> {
        let person = sqlx::query_as::<_, Person>(
            "SELECT id, name, birth_year, eye_color FROM people WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(person)
    }

    pub async fn create(&self, person: NewPerson) -> Result<Person, DbError> {
        let created = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (name, birth_year, eye_color)
            VALUES ($1, $2, $3)
            RETURNING id, name, birth_year, eye_color
            "#,
        )
        .bind(&person.name)
        .bind(&person.birth_year)
        .bind(&person.eye_color)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
