//! Events that trigger routine state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineEvent {
    // Stack routine
    /// Stack directory created, shooting begins
    StartStack,
    /// Last shot of the stack taken
    StackFinished,

    // Full routine
    /// Turntable drive begins
    StartRotation,
    /// Turntable drive done, slider re-homing begins
    RotationFinished,
    /// Slider home, shooting of the next stack begins
    NextStack,
    /// Session over (single stack done or all stacks done)
    RoutineFinished,

    // Faults
    /// Hardware or storage failure
    Fault(FaultKind),
    /// Operator cancelled the routine
    Cancel,
    /// Operator acknowledged a fault
    Acknowledge,
}

impl RoutineEvent {
    /// Check if this event comes from the operator
    pub fn is_operator_event(&self) -> bool {
        matches!(self, RoutineEvent::Cancel | RoutineEvent::Acknowledge)
    }

    /// Check if this event ends the routine abnormally
    pub fn is_abort(&self) -> bool {
        matches!(self, RoutineEvent::Fault(_) | RoutineEvent::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_events() {
        assert!(RoutineEvent::Cancel.is_operator_event());
        assert!(RoutineEvent::Acknowledge.is_operator_event());
        assert!(!RoutineEvent::StartStack.is_operator_event());
    }

    #[test]
    fn test_abort_events() {
        assert!(RoutineEvent::Fault(FaultKind::Camera).is_abort());
        assert!(RoutineEvent::Cancel.is_abort());
        assert!(!RoutineEvent::RoutineFinished.is_abort());
    }
}
