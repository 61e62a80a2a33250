//! Favorite association repository
//!
//! Handles both link tables. Lists are returned in the order the
//! favorites were added.

use sqlx::PgPool;

use super::DbError;
use crate::models::{AddOutcome, DuplicatePolicy, FavoriteTarget, Person, Planet};

/// Statements for one link table
struct LinkSql {
    insert: &'static str,
    insert_if_absent: &'static str,
    remove_one: &'static str,
}

const PEOPLE_LINKS: LinkSql = LinkSql {
    insert: "INSERT INTO favorite_people (user_id, person_id) VALUES ($1, $2)",
    insert_if_absent: r#"
        INSERT INTO favorite_people (user_id, person_id)
        SELECT $1::int4, $2::int4
        WHERE NOT EXISTS (
            SELECT 1 FROM favorite_people WHERE user_id = $1 AND person_id = $2
        )
    "#,
    remove_one: r#"
        DELETE FROM favorite_people
        WHERE id = (
            SELECT id FROM favorite_people
            WHERE user_id = $1 AND person_id = $2
            ORDER BY id
            LIMIT 1
        )
    "#,
};

const PLANET_LINKS: LinkSql = LinkSql {
    insert: "INSERT INTO favorite_planets (user_id, planet_id) VALUES ($1, $2)",
    insert_if_absent: r#"
        INSERT INTO favorite_planets (user_id, planet_id)
        SELECT $1::int4, $2::int4
        WHERE NOT EXISTS (
            SELECT 1 FROM favorite_planets WHERE user_id = $1 AND planet_id = $2
        )
    "#,
    remove_one: r#"
        DELETE FROM favorite_planets
        WHERE id = (
            SELECT id FROM favorite_planets
            WHERE user_id = $1 AND planet_id = $2
            ORDER BY id
            LIMIT 1
        )
    "#,
};

fn links_for(target: FavoriteTarget) -> &'static LinkSql {
    match target {
        FavoriteTarget::Person(_) => &PEOPLE_LINKS,
        FavoriteTarget::Planet(_) => &PLANET_LINKS,
    }
}

/// Favorite repository
pub struct FavoriteRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// People favorited by a user, joined in one query.
    pub async fn people(&self, user_id: i32) -> Result<Vec<Person>, DbError> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT p.id, p.name, p.birth_year, p.eye_color
            FROM favorite_people f
            JOIN people p ON p.id = f.person_id
            WHERE f.user_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(people)
    }

    /// Planets favorited by a user, joined in one query.
    pub async fn planets(&self, user_id: i32) -> Result<Vec<Planet>, DbError> {
        let planets = sqlx::query_as::<_, Planet>(
            r#"
            SELECT p.id, p.name, p.diameter, p.gravity
            FROM favorite_planets f
            JOIN planets p ON p.id = f.planet_id
            WHERE f.user_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(planets)
    }

    /// Link a user to a catalog entity.
    ///
    /// Unless the policy allows repeats, the insert is conditional on the
    /// pair being absent and reports `AlreadyPresent` when nothing was written.
    pub async fn add(
        &self,
        user_id: i32,
        target: FavoriteTarget,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome, DbError> {
        let links = links_for(target);
        let sql = if policy.skips_existing() {
            links.insert_if_absent
        } else {
            links.insert
        };

        let result = sqlx::query(sql)
            .bind(user_id)
            .bind(target.id())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Ok(AddOutcome::AlreadyPresent)
        } else {
            Ok(AddOutcome::Added)
        }
    }

    /// Remove the oldest link for the pair. Returns false if none existed.
    pub async fn remove(&self, user_id: i32, target: FavoriteTarget) -> Result<bool, DbError> {
        let result = sqlx::query(links_for(target).remove_one)
            .bind(user_id)
            .bind(target.id())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
