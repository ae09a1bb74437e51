//! Restricted-dates settings model (singleton row).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// The singleton row from `restricted_date_settings`.
///
/// Auto-created with defaults the first time it is read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestrictedDateSettings {
    pub id: DbId,
    /// ISO weekday numbers (1 = Monday .. 7 = Sunday) on which no walks run.
    pub closed_days: Vec<i16>,
    /// Specific dates on which no walks run.
    pub blocked_dates: Vec<NaiveDate>,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub updated_at: Timestamp,
}

/// DTO for replacing the settings. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateRestrictedDateSettings {
    pub closed_days: Option<Vec<i16>>,
    pub blocked_dates: Option<Vec<NaiveDate>>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}
