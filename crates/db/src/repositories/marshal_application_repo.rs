//! Repository for the `marshal_applications` table.

use sqlx::PgPool;
use waggytail_core::applications::STATUS_PENDING;
use waggytail_core::types::DbId;

use crate::models::marshal_application::{ApplicationListing, MarshalApplication};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, status, message, application_date, updated_at";

/// Provides operations for marshal applications.
pub struct MarshalApplicationRepo;

impl MarshalApplicationRepo {
    /// Insert a new pending application.
    ///
    /// The `uq_marshal_applications_pending` partial index rejects a
    /// second pending application for the same user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        message: Option<&str>,
    ) -> Result<MarshalApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO marshal_applications (user_id, status, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarshalApplication>(&query)
            .bind(user_id)
            .bind(STATUS_PENDING)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Whether the user already has a pending application.
    pub async fn has_pending(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM marshal_applications WHERE user_id = $1 AND status = $2",
        )
        .bind(user_id)
        .bind(STATUS_PENDING)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarshalApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marshal_applications WHERE id = $1");
        sqlx::query_as::<_, MarshalApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all applications with applicant details, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ApplicationListing>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationListing>(
            "SELECT a.id, a.user_id, u.name AS user_name, u.email AS user_email, \
                    a.status, a.message, a.application_date
             FROM marshal_applications a
             JOIN users u ON u.id = a.user_id
             ORDER BY a.application_date DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Record an admin decision on an application.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<MarshalApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE marshal_applications SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarshalApplication>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
