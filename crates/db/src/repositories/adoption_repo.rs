//! Repository for the `adoptions` table.

use sqlx::PgPool;
use waggytail_core::adoption::{STATUS_PENDING, STATUS_REPLIED};
use waggytail_core::types::DbId;

use crate::models::adoption::{Adoption, AdoptionListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, dog_id, user_id, status, message, reply_message, reply_date, \
                        created_at, updated_at";

/// Listing projection with dog and inquirer names expanded.
const LISTING_COLUMNS: &str = "a.id, a.dog_id, d.name AS dog_name, a.user_id, \
    u.name AS user_name, u.email AS user_email, a.status, a.message, \
    a.reply_message, a.reply_date, a.created_at";

/// Provides CRUD operations for adoption inquiries.
pub struct AdoptionRepo;

impl AdoptionRepo {
    /// Insert a new pending inquiry, returning the created row.
    ///
    /// The `uq_adoptions_dog_user` constraint rejects a second inquiry
    /// for the same (dog, user) pair.
    pub async fn create(
        pool: &PgPool,
        dog_id: DbId,
        user_id: DbId,
        message: &str,
    ) -> Result<Adoption, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoptions (dog_id, user_id, status, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(dog_id)
            .bind(user_id)
            .bind(STATUS_PENDING)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Find an inquiry by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoptions WHERE id = $1");
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all inquiries with names expanded, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdoptionListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM adoptions a
             JOIN dogs d ON d.id = a.dog_id
             JOIN users u ON u.id = a.user_id
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, AdoptionListing>(&query)
            .fetch_all(pool)
            .await
    }

    /// List pending inquiries with names expanded, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<AdoptionListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM adoptions a
             JOIN dogs d ON d.id = a.dog_id
             JOIN users u ON u.id = a.user_id
             WHERE a.status = $1
             ORDER BY a.created_at"
        );
        sqlx::query_as::<_, AdoptionListing>(&query)
            .bind(STATUS_PENDING)
            .fetch_all(pool)
            .await
    }

    /// List a user's own inquiries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AdoptionListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM adoptions a
             JOIN dogs d ON d.id = a.dog_id
             JOIN users u ON u.id = a.user_id
             WHERE a.user_id = $1
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, AdoptionListing>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find the inquiry a user has open against a specific dog, if any.
    pub async fn find_by_user_and_dog(
        pool: &PgPool,
        user_id: DbId,
        dog_id: DbId,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adoptions WHERE user_id = $1 AND dog_id = $2"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(user_id)
            .bind(dog_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a staff reply: status becomes `Replied`, the reply text and
    /// date are stored. Returns `None` if the inquiry does not exist.
    pub async fn reply(
        pool: &PgPool,
        id: DbId,
        reply_message: &str,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!(
            "UPDATE adoptions SET
                status = $2,
                reply_message = $3,
                reply_date = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .bind(STATUS_REPLIED)
            .bind(reply_message)
            .fetch_optional(pool)
            .await
    }

    /// Set the inquiry status (admin approve/reject).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!(
            "UPDATE adoptions SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an inquiry. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM adoptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
