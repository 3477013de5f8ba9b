//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating state transitions across
//! the lifecycles in this crate (bookings, surgery inquiries).

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition graph; validated transitions and
/// terminal detection come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for InquiryStatus {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             New => vec![InProgress, Completed],
///             InProgress => vec![Completed],
///             Completed => vec![],
///         }
///     }
/// }
///
/// let next = InquiryStatus::New.transition_to(InquiryStatus::InProgress)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is a direct edge.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Off,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Red => vec![Light::Green, Light::Off],
                Light::Green => vec![Light::Red, Light::Off],
                Light::Off => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        assert!(Light::Off.transition_to(Light::Red).is_err());
        assert!(Light::Red.transition_to(Light::Red).is_err());
    }

    #[test]
    fn is_terminal_only_for_states_without_edges() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Red.is_terminal());
    }
}
