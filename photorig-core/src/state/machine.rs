//! State machine definition
//!
//! Every routine step (shooting, rotating, re-homing) is reflected here so
//! that the engine can refuse overlapping work and observers can follow the
//! session.

use core::fmt;

use super::events::RoutineEvent;

/// Routine states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineState {
    /// No routine running, settings editable
    #[default]
    Idle,
    /// Capture/advance loop of a stack in progress
    Shooting,
    /// All shots of the current stack taken
    StackComplete,
    /// Turntable being driven to the next angle
    Rotating,
    /// Slider travelling back to home
    Returning,
    /// Routine halted; outputs disabled, waiting for acknowledgement
    Aborted(FaultKind),
}

/// Reason a routine was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Camera failed to capture
    Camera,
    /// Stack directory already existed
    DirectoryExists,
    /// GPIO write failed
    Gpio,
    /// Image store failure other than a collision
    Storage,
    /// File or directory name did not fit
    Naming,
    /// Operator requested cancellation
    Cancelled,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaultKind::Camera => "camera failure",
            FaultKind::DirectoryExists => "stack directory exists",
            FaultKind::Gpio => "gpio failure",
            FaultKind::Storage => "storage failure",
            FaultKind::Naming => "name too long",
            FaultKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl fmt::Display for RoutineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineState::Idle => f.write_str("idle"),
            RoutineState::Shooting => f.write_str("shooting"),
            RoutineState::StackComplete => f.write_str("stack complete"),
            RoutineState::Rotating => f.write_str("rotating"),
            RoutineState::Returning => f.write_str("returning"),
            RoutineState::Aborted(kind) => write!(f, "aborted ({})", kind),
        }
    }
}

impl RoutineState {
    /// Check if a routine is in progress
    pub fn is_busy(&self) -> bool {
        !matches!(self, RoutineState::Idle | RoutineState::Aborted(_))
    }

    /// Check if this is an aborted state
    pub fn is_aborted(&self) -> bool {
        matches!(self, RoutineState::Aborted(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: RoutineEvent) -> Self {
        use RoutineEvent::*;
        use RoutineState::*;

        match (self, event) {
            // Idle transitions
            (Idle, StartStack) => Shooting,

            // Shooting transitions
            (Shooting, StackFinished) => StackComplete,

            // StackComplete transitions
            (StackComplete, StartRotation) => Rotating,
            (StackComplete, RoutineFinished) => Idle,

            // Rotating transitions
            (Rotating, RotationFinished) => Returning,
            (Rotating, RoutineFinished) => Idle,

            // Returning transitions
            (Returning, NextStack) => Shooting,
            (Returning, RoutineFinished) => Idle,

            // Abort from any active state
            (state, Fault(kind)) if !state.is_aborted() => Aborted(kind),
            (state, Cancel) if state.is_busy() => Aborted(FaultKind::Cancelled),

            // Aborted transitions
            (Aborted(_), Acknowledge) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
