//! Schema bootstrap for the catalog tables
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::PgPool;

/// Create the catalog and favorite tables if they are missing.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring catalog schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            birth_year TEXT NOT NULL,
            eye_color TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            diameter BIGINT NOT NULL,
            gravity TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Association rows carry a surrogate id so the `allow` duplicate policy
    // can store the same pair more than once.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite_people (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite_planets (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            planet_id INTEGER NOT NULL REFERENCES planets(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_favorite_people_pair ON favorite_people(user_id, person_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_favorite_planets_pair ON favorite_planets(user_id, planet_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Catalog schema ready");
    Ok(())
}
