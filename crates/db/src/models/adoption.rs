//! Adoption inquiry entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `adoptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Adoption {
    pub id: DbId,
    pub dog_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub message: String,
    pub reply_message: Option<String>,
    pub reply_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An inquiry joined with dog and inquirer names for the admin view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionListing {
    pub id: DbId,
    pub dog_id: DbId,
    pub dog_name: String,
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub status: String,
    pub message: String,
    pub reply_message: Option<String>,
    pub reply_date: Option<Timestamp>,
    pub created_at: Timestamp,
}
