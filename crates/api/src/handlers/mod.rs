//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `waggytail_db` and map
//! errors via [`crate::error::AppError`]. Side effects (notifications,
//! best-effort email) run after the core record has been persisted.

pub mod adoptions;
pub mod auth;
pub mod check_ins;
pub mod dogs;
pub mod marshal_applications;
pub mod notifications;
pub mod reviews;
pub mod settings;
pub mod users;
pub mod walks;
