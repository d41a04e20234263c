//! Routine state machine

pub mod events;
pub mod machine;

pub use events::RoutineEvent;
pub use machine::{FaultKind, RoutineState};
