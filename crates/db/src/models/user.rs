//! User entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// `None` for externally-authenticated accounts.
    pub password_hash: Option<String>,
    pub role: String,
    pub user_points: i32,
    pub waiver_signed: bool,
    /// Walk ids the user is currently committed to.
    pub dogs_walked: Vec<DbId>,
    /// Booking ids held by the user.
    pub booked_walks: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: String,
    pub user_points: i32,
    pub waiver_signed: bool,
    pub dogs_walked: Vec<DbId>,
    pub booked_walks: Vec<DbId>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            date_of_birth: u.date_of_birth,
            role: u.role,
            user_points: u.user_points,
            waiver_signed: u.waiver_signed,
            dogs_walked: u.dogs_walked,
            booked_walks: u.booked_walks,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub password_hash: Option<String>,
    pub role: String,
}

/// DTO for updating a user's profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub waiver_signed: Option<bool>,
}
