//! Walk scheduling constants and calendar-day helpers.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

/// Slots contributed by each marshal attached to a walk session.
pub const DEFAULT_CAPACITY_UNIT: i32 = 4;

/// Inclusive UTC bounds of a calendar day: 00:00:00.000 to 23:59:59.999.
///
/// Used by cancel-day and the upcoming-walk reminder sweep. Timestamps
/// are stored in UTC, so a "day" is the UTC calendar day of the given
/// date.
pub fn day_bounds(date: NaiveDate) -> (Timestamp, Timestamp) {
    let start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is always valid");
    (
        Utc.from_utc_datetime(&start),
        Utc.from_utc_datetime(&end),
    )
}
