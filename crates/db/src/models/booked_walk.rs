//! Booked walk entity model and DTOs.
//!
//! A booked walk is one user's reservation against a scheduled walk.
//! `marshal_ids`, `date`, and `location` are snapshots taken at booking
//! time (a materialized read model), not live references to the walk.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `booked_walks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookedWalk {
    pub id: DbId,
    /// `None` for manual walk-in entries.
    pub walk_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub marshal_ids: Vec<DbId>,
    pub date: Timestamp,
    pub location: Option<String>,
    /// Seats this reservation consumes.
    pub slots: i32,
    /// Text form of [`waggytail_core::booking::BookingStatus`].
    pub status: String,
    /// Dogs walked during this session, appended one at a time during
    /// check-in.
    pub dog_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking joined with the walker's name and email for check-in views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithWalker {
    pub id: DbId,
    pub walk_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub date: Timestamp,
    pub location: Option<String>,
    pub slots: i32,
    pub status: String,
    pub dog_ids: Vec<DbId>,
}
