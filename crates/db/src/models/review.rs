//! Review entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub dog_id: DbId,
    /// Star rating, 1 through 5.
    pub star: i16,
    pub review: String,
    /// Image URLs; upload happens in an external service.
    pub images: Vec<String>,
    pub created_at: Timestamp,
}

/// A review joined with the reviewer's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewListing {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub dog_id: DbId,
    pub star: i16,
    pub review: String,
    pub images: Vec<String>,
    pub created_at: Timestamp,
}
