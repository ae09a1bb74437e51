//! Dog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `dogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    pub breed: String,
    pub color: Option<String>,
    pub age: Option<i32>,
    pub size: String,
    pub demeanor: Option<String>,
    pub status: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    /// Last time the dog was taken out on a walk.
    pub last_walk: Option<Timestamp>,
    /// Booking ids during which this dog was walked.
    pub walks: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dog.
#[derive(Debug, Deserialize)]
pub struct CreateDog {
    pub name: String,
    pub breed: String,
    pub color: Option<String>,
    pub age: Option<i32>,
    pub size: String,
    pub demeanor: Option<String>,
    pub status: Option<String>,
    pub photos: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// DTO for updating an existing dog. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateDog {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age: Option<i32>,
    pub size: Option<String>,
    pub demeanor: Option<String>,
    pub status: Option<String>,
    pub photos: Option<Vec<String>>,
    pub notes: Option<String>,
}
