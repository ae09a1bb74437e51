//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod adoption;
pub mod booked_walk;
pub mod dog;
pub mod marshal_application;
pub mod notification;
pub mod restricted_dates;
pub mod review;
pub mod scheduled_walk;
pub mod session;
pub mod user;
