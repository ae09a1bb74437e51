//! Repository for the `dogs` table.

use sqlx::PgPool;
use waggytail_core::types::DbId;

use crate::models::dog::{CreateDog, Dog, UpdateDog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, breed, color, age, size, demeanor, status, photos, \
                        notes, last_walk, walks, created_at, updated_at";

/// Provides CRUD operations for dogs.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, breed, color, age, size, demeanor, status, photos, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'Available'), COALESCE($8, '{{}}'), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.color)
            .bind(input.age)
            .bind(&input.size)
            .bind(&input.demeanor)
            .bind(&input.status)
            .bind(&input.photos)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a dog by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dogs ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs ORDER BY name");
        sqlx::query_as::<_, Dog>(&query).fetch_all(pool).await
    }

    /// Update a dog. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDog,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET
                name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                color = COALESCE($4, color),
                age = COALESCE($5, age),
                size = COALESCE($6, size),
                demeanor = COALESCE($7, demeanor),
                status = COALESCE($8, status),
                photos = COALESCE($9, photos),
                notes = COALESCE($10, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.color)
            .bind(input.age)
            .bind(&input.size)
            .bind(&input.demeanor)
            .bind(&input.status)
            .bind(&input.photos)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dog. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
