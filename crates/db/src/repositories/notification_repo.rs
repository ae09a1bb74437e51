//! Repository for the `notifications` table.
//!
//! The feed is append-only: the only mutation is the read-state toggle,
//! and ownership scoping for that lives in the handler (it needs to
//! distinguish 403 from 404).

use sqlx::PgPool;
use waggytail_core::notifications::{KIND_UPCOMING, ROLE_ALL};
use waggytail_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, recipient_id, role, kind, message, read_status, walk_id, dog_id, created_at";

/// Provides append and read operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Append a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (recipient_id, role, kind, message, walk_id, dog_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.recipient_id)
            .bind(&input.role)
            .bind(&input.kind)
            .bind(&input.message)
            .bind(input.walk_id)
            .bind(input.dog_id)
            .fetch_one(pool)
            .await
    }

    /// Find a notification by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notifications visible to a caller: addressed to them, or
    /// broadcast to their role (or to everyone). Newest first.
    pub async fn list_for_caller(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE recipient_id = $1
                OR (recipient_id IS NULL AND role IN ($2, $3))
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(role)
            .bind(ROLE_ALL)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set a notification's read flag. Returns `true` if the row existed
    /// and was still unread.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET read_status = true WHERE id = $1 AND read_status = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count unread notifications visible to a caller.
    pub async fn unread_count(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications
             WHERE read_status = false
               AND (recipient_id = $1 OR (recipient_id IS NULL AND role IN ($2, $3)))",
        )
        .bind(user_id)
        .bind(role)
        .bind(ROLE_ALL)
        .fetch_one(pool)
        .await
    }

    /// Whether an upcoming-walk reminder already exists for this
    /// recipient and walk. Idempotency key of the daily sweep.
    pub async fn upcoming_exists(
        pool: &PgPool,
        recipient_id: DbId,
        walk_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications
             WHERE recipient_id = $1 AND kind = $2 AND walk_id = $3",
        )
        .bind(recipient_id)
        .bind(KIND_UPCOMING)
        .bind(walk_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }
}
