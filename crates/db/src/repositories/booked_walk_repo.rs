//! Repository for the `booked_walks` table.
//!
//! The confirm/cancel/complete/no-show flows each touch several tables
//! (the booking row, the scheduled walk's membership lists, the owner's
//! cross-reference lists, the walked dog). Each flow runs inside one
//! transaction so a failure partway through leaves no partial state.

use sqlx::PgPool;
use waggytail_core::booking::BookingStatus;
use waggytail_core::points::{COMPLETION_POINTS, NO_SHOW_PENALTY};
use waggytail_core::types::{DbId, Timestamp};

use crate::models::booked_walk::{BookedWalk, BookingWithWalker};
use crate::models::scheduled_walk::ScheduledWalk;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, walk_id, user_id, marshal_ids, date, location, slots, status, \
                        dog_ids, created_at, updated_at";

/// Booking joined with walker identity for check-in views.
const WALKER_COLUMNS: &str = "b.id, b.walk_id, b.user_id, u.name AS user_name, \
    u.email AS user_email, b.date, b.location, b.slots, b.status, b.dog_ids";

/// Provides booking lifecycle operations.
pub struct BookedWalkRepo;

impl BookedWalkRepo {
    /// Reserve `slots_requested` seats on a walk for a user.
    ///
    /// The first statement is a conditional decrement: it only fires when
    /// the walk still has enough capacity and the user is not already in
    /// `walker_ids`, so two concurrent confirms cannot admit more walkers
    /// than capacity. Returns `None` when the guard fails; the caller
    /// distinguishes insufficient-capacity from already-booked by
    /// inspecting the walk it fetched beforehand.
    pub async fn confirm(
        pool: &PgPool,
        walk: &ScheduledWalk,
        user_id: DbId,
        slots_requested: i32,
    ) -> Result<Option<BookedWalk>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let reserved: Option<DbId> = sqlx::query_scalar(
            "UPDATE scheduled_walks SET
                slots = slots - $2,
                walker_ids = array_append(walker_ids, $3),
                updated_at = NOW()
             WHERE id = $1 AND slots >= $2 AND NOT (walker_ids @> ARRAY[$3]::bigint[])
             RETURNING id",
        )
        .bind(walk.id)
        .bind(slots_requested)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if reserved.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let insert = format!(
            "INSERT INTO booked_walks (walk_id, user_id, marshal_ids, date, location, slots, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, BookedWalk>(&insert)
            .bind(walk.id)
            .bind(user_id)
            .bind(&walk.marshal_ids)
            .bind(walk.date)
            .bind(&walk.location)
            .bind(slots_requested)
            .bind(BookingStatus::Booked.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET
                dogs_walked = array_append(dogs_walked, $2),
                booked_walks = array_append(booked_walks, $3),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(walk.id)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE scheduled_walks SET booking_ids = array_append(booking_ids, $2) WHERE id = $1",
        )
        .bind(walk.id)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Reverse a reservation: restore the walk's capacity, pull the user
    /// and booking out of the walk's lists, pull the walk and booking out
    /// of the user's lists, and delete the booking row.
    pub async fn cancel(pool: &PgPool, booking: &BookedWalk) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(walk_id) = booking.walk_id {
            sqlx::query(
                "UPDATE scheduled_walks SET
                    slots = slots + $2,
                    walker_ids = array_remove(walker_ids, $3),
                    booking_ids = array_remove(booking_ids, $4),
                    updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(walk_id)
            .bind(booking.slots)
            .bind(booking.user_id)
            .bind(booking.id)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(user_id) = booking.user_id {
            sqlx::query(
                "UPDATE users SET
                    dogs_walked = array_remove(dogs_walked, $2),
                    booked_walks = array_remove(booked_walks, $3),
                    updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(user_id)
            .bind(booking.walk_id)
            .bind(booking.id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM booked_walks WHERE id = $1")
            .bind(booking.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Set a booking's status. The caller validates the transition via
    /// the [`BookingStatus`] table before calling.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<BookedWalk>, sqlx::Error> {
        let query = format!(
            "UPDATE booked_walks SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookedWalk>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Record a dog as walked during a booking: append it to the
    /// booking's `dog_ids`, stamp the dog's `last_walk`, and append the
    /// booking to the dog's `walks` history.
    ///
    /// Returns `None` if the dog is already recorded on this booking.
    pub async fn record_dog_walked(
        pool: &PgPool,
        booking_id: DbId,
        dog_id: DbId,
    ) -> Result<Option<BookedWalk>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE booked_walks SET dog_ids = array_append(dog_ids, $2), updated_at = NOW()
             WHERE id = $1 AND NOT (dog_ids @> ARRAY[$2]::bigint[])
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, BookedWalk>(&update)
            .bind(booking_id)
            .bind(dog_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(booking) = booking else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE dogs SET last_walk = NOW(), walks = array_append(walks, $2), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(dog_id)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Complete a walker's booking: status to `completed`, award points,
    /// and release the walker from the walk's and their own active lists.
    pub async fn complete(
        pool: &PgPool,
        booking_id: DbId,
        user_id: DbId,
        walk_id: DbId,
    ) -> Result<BookedWalk, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE booked_walks SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, BookedWalk>(&update)
            .bind(booking_id)
            .bind(BookingStatus::Completed.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET
                dogs_walked = array_remove(dogs_walked, $2),
                user_points = user_points + $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(walk_id)
        .bind(COMPLETION_POINTS)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE scheduled_walks SET walker_ids = array_remove(walker_ids, $2), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(walk_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Mark a walker as a no-show: status to `did not show`, deduct
    /// points floored at zero, and release the walker as in [`Self::complete`].
    pub async fn mark_no_show(
        pool: &PgPool,
        booking_id: DbId,
        user_id: DbId,
        walk_id: DbId,
    ) -> Result<BookedWalk, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE booked_walks SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, BookedWalk>(&update)
            .bind(booking_id)
            .bind(BookingStatus::DidNotShow.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET
                dogs_walked = array_remove(dogs_walked, $2),
                user_points = GREATEST(user_points - $3, 0),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(walk_id)
        .bind(NO_SHOW_PENALTY)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE scheduled_walks SET walker_ids = array_remove(walker_ids, $2), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(walk_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Record a manual walk-in: a completed booking with no scheduled
    /// session behind it. Stamps the dog's `last_walk` and history.
    pub async fn create_manual(
        pool: &PgPool,
        dog_id: DbId,
        marshal_id: DbId,
        date: Timestamp,
    ) -> Result<BookedWalk, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO booked_walks (walk_id, user_id, marshal_ids, date, slots, status, dog_ids)
             VALUES (NULL, NULL, ARRAY[$1]::bigint[], $2, 1, $3, ARRAY[$4]::bigint[])
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, BookedWalk>(&insert)
            .bind(marshal_id)
            .bind(date)
            .bind(BookingStatus::Completed.as_str())
            .bind(dog_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE dogs SET last_walk = $2, walks = array_append(walks, $3), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(dog_id)
        .bind(date)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Find a booking by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BookedWalk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM booked_walks WHERE id = $1");
        sqlx::query_as::<_, BookedWalk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the booking a user holds on a specific walk.
    pub async fn find_by_user_and_walk(
        pool: &PgPool,
        user_id: DbId,
        walk_id: DbId,
    ) -> Result<Option<BookedWalk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM booked_walks WHERE user_id = $1 AND walk_id = $2"
        );
        sqlx::query_as::<_, BookedWalk>(&query)
            .bind(user_id)
            .bind(walk_id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookings with walker identity expanded, soonest first.
    pub async fn list_with_walkers(pool: &PgPool) -> Result<Vec<BookingWithWalker>, sqlx::Error> {
        let query = format!(
            "SELECT {WALKER_COLUMNS} FROM booked_walks b
             LEFT JOIN users u ON u.id = b.user_id
             ORDER BY b.date"
        );
        sqlx::query_as::<_, BookingWithWalker>(&query)
            .fetch_all(pool)
            .await
    }

    /// List bookings in a terminal state (completed or did-not-show),
    /// most recent first.
    pub async fn list_finished(pool: &PgPool) -> Result<Vec<BookingWithWalker>, sqlx::Error> {
        let query = format!(
            "SELECT {WALKER_COLUMNS} FROM booked_walks b
             LEFT JOIN users u ON u.id = b.user_id
             WHERE b.status IN ($1, $2)
             ORDER BY b.date DESC"
        );
        sqlx::query_as::<_, BookingWithWalker>(&query)
            .bind(BookingStatus::Completed.as_str())
            .bind(BookingStatus::DidNotShow.as_str())
            .fetch_all(pool)
            .await
    }

    /// List still-booked reservations whose walk date falls in the range.
    /// Used by the upcoming-walk reminder sweep.
    pub async fn list_booked_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<BookingWithWalker>, sqlx::Error> {
        let query = format!(
            "SELECT {WALKER_COLUMNS} FROM booked_walks b
             LEFT JOIN users u ON u.id = b.user_id
             WHERE b.status = $1 AND b.date >= $2 AND b.date <= $3
             ORDER BY b.date"
        );
        sqlx::query_as::<_, BookingWithWalker>(&query)
            .bind(BookingStatus::Booked.as_str())
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
