//! Repository for the `reviews` table.

use sqlx::PgPool;
use waggytail_core::types::DbId;

use crate::models::review::{Review, ReviewListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, dog_id, star, review, images, created_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        dog_id: DbId,
        star: i16,
        review: &str,
        images: &[String],
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, dog_id, star, review, images)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(dog_id)
            .bind(star)
            .bind(review)
            .bind(images)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews for a dog with reviewer names, newest first.
    pub async fn list_for_dog(
        pool: &PgPool,
        dog_id: DbId,
    ) -> Result<Vec<ReviewListing>, sqlx::Error> {
        sqlx::query_as::<_, ReviewListing>(
            "SELECT r.id, r.user_id, u.name AS user_name, r.dog_id, r.star, r.review, \
                    r.images, r.created_at
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.dog_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(dog_id)
        .fetch_all(pool)
        .await
    }

    /// Recent photo URLs across all reviews, newest review first.
    pub async fn recent_photos(pool: &PgPool, limit: i64) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT unnest(images) FROM reviews
             WHERE images <> '{}'
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Delete a review. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
