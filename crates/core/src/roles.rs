//! Well-known role name constants.
//!
//! Every account carries exactly one of these role names. New accounts
//! start as `user`; only the marshal-application approval workflow
//! promotes to `marshal`.

pub const ROLE_USER: &str = "user";
pub const ROLE_MARSHAL: &str = "marshal";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_MARSHAL, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

/// Whether a role may host walk sessions and run check-ins.
pub fn can_marshal(role: &str) -> bool {
    role == ROLE_MARSHAL || role == ROLE_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_accepted() {
        assert!(validate_role(ROLE_USER).is_ok());
        assert!(validate_role(ROLE_MARSHAL).is_ok());
        assert!(validate_role(ROLE_ADMIN).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = validate_role("superuser");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }

    #[test]
    fn test_admin_can_marshal() {
        assert!(can_marshal(ROLE_MARSHAL));
        assert!(can_marshal(ROLE_ADMIN));
        assert!(!can_marshal(ROLE_USER));
    }
}
