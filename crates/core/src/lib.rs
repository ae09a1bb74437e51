//! Shared domain types for the waggytail platform.
//!
//! This crate is the leaf of the workspace: it holds the id/timestamp
//! aliases, the domain error enum, role and status vocabularies, the
//! booking state machine, and the small pieces of arithmetic (points,
//! day bounds) that both the database and API layers depend on.

pub mod adoption;
pub mod applications;
pub mod booking;
pub mod dogs;
pub mod error;
pub mod notifications;
pub mod points;
pub mod roles;
pub mod schedule;
pub mod types;
