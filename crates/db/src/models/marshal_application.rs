//! Marshal application entity model.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `marshal_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarshalApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub application_date: Timestamp,
    pub updated_at: Timestamp,
}

/// An application joined with applicant details for the admin view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationListing {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub status: String,
    pub message: Option<String>,
    pub application_date: Timestamp,
}
