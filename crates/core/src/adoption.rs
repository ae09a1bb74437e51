//! Adoption inquiry status vocabulary.

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_APPROVED: &str = "Approved";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_REPLIED: &str = "Replied";

/// All valid adoption statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_REPLIED,
];

/// Statuses an admin may set directly via the status-update endpoint.
/// `Pending` is set at creation and `Replied` only via the reply flow.
pub const ADMIN_SETTABLE_STATUSES: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate a status for the admin status-update endpoint.
pub fn validate_admin_status(status: &str) -> Result<(), String> {
    if ADMIN_SETTABLE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            ADMIN_SETTABLE_STATUSES.join(", ")
        ))
    }
}
