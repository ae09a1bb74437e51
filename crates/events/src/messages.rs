//! The catalogue of mail messages the platform sends.
//!
//! Each constructor builds a plain-text [`OutboundEmail`] for one flow.
//! Formatting lives here so handlers and the reminder sweep never
//! assemble mail bodies inline.

/// A fully assembled plain-text email, ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutboundEmail {
    /// Announcement sent to every user when a new walk is scheduled.
    pub fn walk_announcement(to: &str, name: &str, location: &str, date: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "New group walk scheduled".to_string(),
            body: format!(
                "Hi {name},\n\n\
                 A new group dog walk has been scheduled at {location} on {date}.\n\
                 Slots are limited, so book early!\n\n\
                 The Waggytail team"
            ),
        }
    }

    /// Confirmation sent to the walker after a successful booking.
    pub fn booking_confirmation(
        to: &str,
        name: &str,
        location: &str,
        date: &str,
        slots: i32,
    ) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your walk booking is confirmed".to_string(),
            body: format!(
                "Hi {name},\n\n\
                 You're booked for the group walk at {location} on {date} \
                 ({slots} slot(s)).\n\
                 Please arrive a few minutes early so the marshal can check you in.\n\n\
                 The Waggytail team"
            ),
        }
    }

    /// Reminder sent on the morning of a booked walk.
    pub fn upcoming_reminder(to: &str, name: &str, location: &str, date: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Reminder: you have a walk today".to_string(),
            body: format!(
                "Hi {name},\n\n\
                 A reminder that you're booked for today's group walk at \
                 {location} ({date}).\n\
                 See you there!\n\n\
                 The Waggytail team"
            ),
        }
    }

    /// Staff reply to an adoption inquiry.
    pub fn adoption_reply(to: &str, name: &str, dog_name: &str, reply: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("An update on your inquiry about {dog_name}"),
            body: format!(
                "Hi {name},\n\n\
                 We've replied to your adoption inquiry about {dog_name}:\n\n\
                 {reply}\n\n\
                 The Waggytail team"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_confirmation_mentions_details() {
        let mail = OutboundEmail::booking_confirmation(
            "walker@example.com",
            "Jess",
            "Riverside Park",
            "2025-06-15 10:00",
            2,
        );
        assert_eq!(mail.to, "walker@example.com");
        assert!(mail.body.contains("Riverside Park"));
        assert!(mail.body.contains("2 slot(s)"));
    }

    #[test]
    fn test_adoption_reply_subject_names_dog() {
        let mail = OutboundEmail::adoption_reply("a@b.c", "Sam", "Biscuit", "Come visit!");
        assert!(mail.subject.contains("Biscuit"));
        assert!(mail.body.contains("Come visit!"));
    }
}
