//! Notification entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waggytail_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// `recipient_id = NULL` marks a broadcast; `role` then filters which
/// callers see it (`all` matches everyone). The feed is append-only
/// except for the read-state toggle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: Option<DbId>,
    pub role: Option<String>,
    pub kind: String,
    pub message: String,
    pub read_status: bool,
    pub walk_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_id: Option<DbId>,
    pub role: Option<String>,
    pub kind: String,
    pub message: String,
    pub walk_id: Option<DbId>,
    pub dog_id: Option<DbId>,
}

impl CreateNotification {
    /// A notification addressed to a single user.
    pub fn targeted(recipient_id: DbId, kind: &str, message: impl Into<String>) -> Self {
        Self {
            recipient_id: Some(recipient_id),
            role: None,
            kind: kind.to_string(),
            message: message.into(),
            walk_id: None,
            dog_id: None,
        }
    }

    /// A broadcast notification visible to every user with the given role.
    pub fn broadcast(role: &str, kind: &str, message: impl Into<String>) -> Self {
        Self {
            recipient_id: None,
            role: Some(role.to_string()),
            kind: kind.to_string(),
            message: message.into(),
            walk_id: None,
            dog_id: None,
        }
    }

    /// Attach a walk correlation id.
    pub fn with_walk(mut self, walk_id: DbId) -> Self {
        self.walk_id = Some(walk_id);
        self
    }

    /// Attach a dog correlation id.
    pub fn with_dog(mut self, dog_id: DbId) -> Self {
        self.dog_id = Some(dog_id);
        self
    }
}
