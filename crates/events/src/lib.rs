//! Outbound notification delivery for the waggytail platform.
//!
//! This crate owns the SMTP integration and the catalogue of mail
//! messages the platform sends. Delivery is best-effort by design: a
//! booking or reply that has already been persisted must never fail its
//! HTTP request because the mail relay did.

pub mod email;
pub mod messages;

pub use email::{EmailConfig, EmailDelivery, EmailError, Mailer};
pub use messages::OutboundEmail;
