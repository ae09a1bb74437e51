//! Dog size and status vocabularies.

pub const SIZE_SMALL: &str = "Small";
pub const SIZE_MEDIUM: &str = "Medium";
pub const SIZE_LARGE: &str = "Large";

/// All valid dog sizes.
pub const VALID_SIZES: &[&str] = &[SIZE_SMALL, SIZE_MEDIUM, SIZE_LARGE];

pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_ADOPTED: &str = "Adopted";
pub const STATUS_DECEASED: &str = "Deceased";

/// All valid dog statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_AVAILABLE, STATUS_ADOPTED, STATUS_DECEASED];

/// Validate that a size string is one of the accepted values.
pub fn validate_size(size: &str) -> Result<(), String> {
    if VALID_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(format!(
            "Invalid size '{size}'. Must be one of: {}",
            VALID_SIZES.join(", ")
        ))
    }
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sizes_accepted() {
        for size in VALID_SIZES {
            assert!(validate_size(size).is_ok());
        }
    }

    #[test]
    fn test_invalid_size_rejected() {
        assert!(validate_size("Gigantic").is_err());
        assert!(validate_size("small").is_err(), "sizes are case-sensitive");
    }

    #[test]
    fn test_invalid_status_rejected() {
        let result = validate_status("Lost");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid status"));
    }
}
