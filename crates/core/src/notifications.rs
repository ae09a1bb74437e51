//! Notification kind vocabulary and the broadcast role wildcard.

pub const KIND_BOOKING: &str = "booking";
pub const KIND_UPCOMING: &str = "upcoming";
pub const KIND_ADOPTION: &str = "adoption";
pub const KIND_ANNOUNCEMENT: &str = "announcement";
pub const KIND_MARSHAL_APPLICATION: &str = "marshal_application";

/// All valid notification kinds.
pub const VALID_KINDS: &[&str] = &[
    KIND_BOOKING,
    KIND_UPCOMING,
    KIND_ADOPTION,
    KIND_ANNOUNCEMENT,
    KIND_MARSHAL_APPLICATION,
];

/// Broadcast role filter that matches every caller.
pub const ROLE_ALL: &str = "all";

/// Validate that a kind string is one of the accepted values.
pub fn validate_kind(kind: &str) -> Result<(), String> {
    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(format!(
            "Invalid notification kind '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        ))
    }
}
