//! Scheduled walk entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `scheduled_walks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduledWalk {
    pub id: DbId,
    /// Legacy optional reference; the booking flow does not require it.
    pub dog_id: Option<DbId>,
    /// Marshals co-hosting this session. Each contributed one capacity
    /// unit when they joined.
    pub marshal_ids: Vec<DbId>,
    pub date: Timestamp,
    pub location: String,
    /// Remaining capacity. Never negative; decremented atomically.
    pub slots: i32,
    /// Users who currently hold a booking on this walk.
    pub walker_ids: Vec<DbId>,
    /// Booking ids attached to this walk.
    pub booking_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new scheduled walk.
#[derive(Debug)]
pub struct CreateScheduledWalk {
    pub dog_id: Option<DbId>,
    pub marshal_id: DbId,
    pub date: Timestamp,
    pub location: String,
    pub slots: i32,
}

/// Read-model projection of a walk with marshal and dog names expanded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WalkListing {
    pub id: DbId,
    pub dog_id: Option<DbId>,
    pub dog_name: Option<String>,
    pub marshal_ids: Vec<DbId>,
    pub marshal_names: Vec<String>,
    pub date: Timestamp,
    pub location: String,
    pub slots: i32,
    pub walker_ids: Vec<DbId>,
    pub booking_ids: Vec<DbId>,
}
