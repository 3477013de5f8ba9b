//! Booking status and its transition graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Fulfilment status of a booking.
///
/// `pending → confirmed → sample_collected → results_ready → completed`, with
/// `cancelled` reachable from the first three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    SampleCollected,
    ResultsReady,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::SampleCollected,
        BookingStatus::ResultsReady,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::SampleCollected => "sample_collected",
            BookingStatus::ResultsReady => "results_ready",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Fulfilment states, in which a provider must be assigned. A booking
    /// cancelled while still pending keeps no provider.
    pub fn requires_provider(&self) -> bool {
        matches!(
            self,
            BookingStatus::Confirmed
                | BookingStatus::SampleCollected
                | BookingStatus::ResultsReady
                | BookingStatus::Completed
        )
    }
}

impl StateMachine for BookingStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![SampleCollected, Cancelled],
            SampleCollected => vec![ResultsReady, Cancelled],
            ResultsReady => vec![Completed],
            Completed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown booking status '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn happy_path_is_a_chain_of_direct_edges() {
        let path = [Pending, Confirmed, SampleCollected, ResultsReady, Completed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(&pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn skipping_a_state_is_not_an_edge() {
        assert!(!Pending.can_transition_to(&SampleCollected));
        assert!(!Confirmed.can_transition_to(&ResultsReady));
        assert!(!Pending.can_transition_to(&Completed));
    }

    #[test]
    fn cancellation_only_before_results() {
        assert!(Pending.can_transition_to(&Cancelled));
        assert!(Confirmed.can_transition_to(&Cancelled));
        assert!(SampleCollected.can_transition_to(&Cancelled));
        assert!(!ResultsReady.can_transition_to(&Cancelled));
    }

    #[test]
    fn completed_and_cancelled_are_terminal() {
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!ResultsReady.is_terminal());
    }

    #[test]
    fn no_backward_edges() {
        for status in BookingStatus::ALL {
            assert!(!status.can_transition_to(&Pending));
            assert!(!status.can_transition_to(&status));
        }
    }

    #[test]
    fn only_fulfilment_states_require_a_provider() {
        assert!(!BookingStatus::Pending.requires_provider());
        assert!(!BookingStatus::Cancelled.requires_provider());
        assert!(BookingStatus::Confirmed.requires_provider());
        assert!(BookingStatus::Completed.requires_provider());
    }

    #[test]
    fn parses_wire_names() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!("shipped".parse::<BookingStatus>().is_err());
    }
}
