//! Booking status state machine.
//!
//! A booking moves through `booked -> walking -> completed`, or takes the
//! terminal shortcut `booked -> did not show`. The status is stored as
//! text in the database; this module is the single place that knows which
//! transitions exist. Handlers must go through [`BookingStatus::ensure_transition`]
//! so an out-of-order call fails loudly instead of silently mutating.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a booked walk row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Reservation made, walker not yet arrived.
    Booked,
    /// Walker checked in by a marshal and currently out with dogs.
    Walking,
    /// Walk finished. Terminal.
    Completed,
    /// Walker never arrived. Terminal.
    DidNotShow,
}

impl BookingStatus {
    /// The database text representation.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::Walking => "walking",
            BookingStatus::Completed => "completed",
            BookingStatus::DidNotShow => "did not show",
        }
    }

    /// Parse the database text representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "booked" => Some(BookingStatus::Booked),
            "walking" => Some(BookingStatus::Walking),
            "completed" => Some(BookingStatus::Completed),
            "did not show" => Some(BookingStatus::DidNotShow),
            _ => None,
        }
    }

    /// Whether this state admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::DidNotShow)
    }

    /// The transition table: `booked -> walking`, `booked -> did not show`,
    /// `walking -> completed`. Nothing leaves a terminal state.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Booked, BookingStatus::Walking)
                | (BookingStatus::Booked, BookingStatus::DidNotShow)
                | (BookingStatus::Walking, BookingStatus::Completed)
        )
    }

    /// Validate a requested transition, returning a human-readable error
    /// when the transition is not in the table.
    pub fn ensure_transition(self, next: BookingStatus) -> Result<(), String> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(format!(
                "Invalid booking transition: '{}' -> '{}'",
                self.as_str(),
                next.as_str()
            ))
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_states() {
        for status in [
            BookingStatus::Booked,
            BookingStatus::Walking,
            BookingStatus::Completed,
            BookingStatus::DidNotShow,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(BookingStatus::parse("cancelled"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(BookingStatus::Booked.can_transition_to(BookingStatus::Walking));
        assert!(BookingStatus::Walking.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_no_show_shortcut() {
        assert!(BookingStatus::Booked.can_transition_to(BookingStatus::DidNotShow));
        // A checked-in walker can no longer be marked a no-show.
        assert!(!BookingStatus::Walking.can_transition_to(BookingStatus::DidNotShow));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [BookingStatus::Completed, BookingStatus::DidNotShow] {
            assert!(terminal.is_terminal());
            for next in [
                BookingStatus::Booked,
                BookingStatus::Walking,
                BookingStatus::Completed,
                BookingStatus::DidNotShow,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_no_direct_completion_without_check_in() {
        assert!(!BookingStatus::Booked.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_ensure_transition_message() {
        let err = BookingStatus::Completed
            .ensure_transition(BookingStatus::Walking)
            .unwrap_err();
        assert!(err.contains("'completed' -> 'walking'"));
    }
}
