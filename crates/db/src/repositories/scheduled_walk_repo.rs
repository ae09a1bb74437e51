//! Repository for the `scheduled_walks` table.
//!
//! Capacity is never maintained by read-then-write: the reserve path in
//! [`crate::repositories::BookedWalkRepo`] decrements `slots` with a
//! conditional UPDATE, and the merge path here adds capacity in a single
//! statement, so concurrent requests cannot over-book a session.

use sqlx::PgPool;
use waggytail_core::types::{DbId, Timestamp};

use crate::models::scheduled_walk::{CreateScheduledWalk, ScheduledWalk, WalkListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, dog_id, marshal_ids, date, location, slots, walker_ids, \
                        booking_ids, created_at, updated_at";

/// Listing projection with marshal and dog names expanded.
const LISTING_COLUMNS: &str = "w.id, w.dog_id, d.name AS dog_name, w.marshal_ids, \
    COALESCE((SELECT array_agg(u.name ORDER BY u.name) FROM users u WHERE u.id = ANY(w.marshal_ids)), '{}') AS marshal_names, \
    w.date, w.location, w.slots, w.walker_ids, w.booking_ids";

/// Provides CRUD and merge operations for scheduled walks.
pub struct ScheduledWalkRepo;

impl ScheduledWalkRepo {
    /// Insert a new walk session with a single marshal, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateScheduledWalk,
    ) -> Result<ScheduledWalk, sqlx::Error> {
        let query = format!(
            "INSERT INTO scheduled_walks (dog_id, marshal_ids, date, location, slots)
             VALUES ($1, ARRAY[$2]::bigint[], $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(input.dog_id)
            .bind(input.marshal_id)
            .bind(input.date)
            .bind(&input.location)
            .bind(input.slots)
            .fetch_one(pool)
            .await
    }

    /// Find a walk by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ScheduledWalk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scheduled_walks WHERE id = $1");
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a walk this marshal is already attached to at the exact timestamp.
    pub async fn find_by_marshal_and_date(
        pool: &PgPool,
        marshal_id: DbId,
        date: Timestamp,
    ) -> Result<Option<ScheduledWalk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_walks
             WHERE date = $2 AND marshal_ids @> ARRAY[$1]::bigint[]"
        );
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(marshal_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Find a walk at the exact timestamp and location.
    ///
    /// Merge keys on exact timestamp equality; callers submit dates
    /// already snapped to fixed start times.
    pub async fn find_by_date_and_location(
        pool: &PgPool,
        date: Timestamp,
        location: &str,
    ) -> Result<Option<ScheduledWalk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_walks WHERE date = $1 AND location = $2"
        );
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(date)
            .bind(location)
            .fetch_optional(pool)
            .await
    }

    /// Attach another marshal to an existing session and add their
    /// capacity contribution in one statement.
    ///
    /// Returns `None` if the marshal is already attached (or the walk is
    /// gone), leaving the row unchanged.
    pub async fn merge_marshal(
        pool: &PgPool,
        walk_id: DbId,
        marshal_id: DbId,
        capacity_unit: i32,
    ) -> Result<Option<ScheduledWalk>, sqlx::Error> {
        let query = format!(
            "UPDATE scheduled_walks SET
                marshal_ids = array_append(marshal_ids, $2),
                slots = slots + $3,
                updated_at = NOW()
             WHERE id = $1 AND NOT (marshal_ids @> ARRAY[$2]::bigint[])
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(walk_id)
            .bind(marshal_id)
            .bind(capacity_unit)
            .fetch_optional(pool)
            .await
    }

    /// List all walks with marshal and dog names expanded, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<WalkListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM scheduled_walks w
             LEFT JOIN dogs d ON d.id = w.dog_id
             ORDER BY w.date"
        );
        sqlx::query_as::<_, WalkListing>(&query).fetch_all(pool).await
    }

    /// List walks hosted by the given marshal, soonest first.
    pub async fn list_for_marshal(
        pool: &PgPool,
        marshal_id: DbId,
    ) -> Result<Vec<WalkListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM scheduled_walks w
             LEFT JOIN dogs d ON d.id = w.dog_id
             WHERE w.marshal_ids @> ARRAY[$1]::bigint[]
             ORDER BY w.date"
        );
        sqlx::query_as::<_, WalkListing>(&query)
            .bind(marshal_id)
            .fetch_all(pool)
            .await
    }

    /// List walks whose date falls within the inclusive range.
    pub async fn list_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ScheduledWalk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_walks WHERE date >= $1 AND date <= $2 ORDER BY date"
        );
        sqlx::query_as::<_, ScheduledWalk>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Delete a walk and everything referencing it: its bookings are
    /// removed and each affected user's `dogs_walked`/`booked_walks`
    /// lists are cleaned, all in one transaction.
    ///
    /// Returns `false` if the walk does not exist.
    pub async fn delete_cascade(pool: &PgPool, walk_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = Self::delete_cascade_tx(&mut tx, walk_id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    /// Delete every walk on the given day (inclusive bounds) with the
    /// same cascade semantics. Returns `(walks_deleted, bookings_deleted)`.
    pub async fn delete_day_cascade(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<(u64, u64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let walk_ids: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM scheduled_walks WHERE date >= $1 AND date <= $2")
                .bind(start)
                .bind(end)
                .fetch_all(&mut *tx)
                .await?;

        let mut bookings_deleted = 0u64;
        for walk_id in &walk_ids {
            bookings_deleted += Self::delete_bookings_tx(&mut tx, *walk_id).await?;
            sqlx::query("DELETE FROM scheduled_walks WHERE id = $1")
                .bind(walk_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            walks = walk_ids.len(),
            bookings = bookings_deleted,
            "Cancelled all walks for day"
        );
        Ok((walk_ids.len() as u64, bookings_deleted))
    }

    /// Cascade-delete a single walk inside an open transaction.
    async fn delete_cascade_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        walk_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::delete_bookings_tx(tx, walk_id).await?;
        let result = sqlx::query("DELETE FROM scheduled_walks WHERE id = $1")
            .bind(walk_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all bookings for a walk and pull the walk/booking refs out
    /// of each booking owner's lists. Returns the number of bookings
    /// removed.
    async fn delete_bookings_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        walk_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let bookings: Vec<(DbId, Option<DbId>)> =
            sqlx::query_as("SELECT id, user_id FROM booked_walks WHERE walk_id = $1")
                .bind(walk_id)
                .fetch_all(&mut **tx)
                .await?;

        for (booking_id, user_id) in &bookings {
            if let Some(user_id) = user_id {
                sqlx::query(
                    "UPDATE users SET
                        dogs_walked = array_remove(dogs_walked, $2),
                        booked_walks = array_remove(booked_walks, $3),
                        updated_at = NOW()
                     WHERE id = $1",
                )
                .bind(user_id)
                .bind(walk_id)
                .bind(booking_id)
                .execute(&mut **tx)
                .await?;
            }
        }

        let result = sqlx::query("DELETE FROM booked_walks WHERE walk_id = $1")
            .bind(walk_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
