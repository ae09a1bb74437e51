//! Marshal application status vocabulary.

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_APPROVED: &str = "Approved";
pub const STATUS_REJECTED: &str = "Rejected";

/// All valid application statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Decisions an admin may record on a pending application.
pub const DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate an admin decision value.
pub fn validate_decision(decision: &str) -> Result<(), String> {
    if DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            DECISIONS.join(", ")
        ))
    }
}
