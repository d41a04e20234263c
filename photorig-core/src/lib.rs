//! Board-agnostic core logic for the focus-stacking rig
//!
//! This crate contains all domain logic that does not touch hardware:
//!
//! - Routine settings with the cached stack count and the routine lock
//! - Shot/stack counters and file naming
//! - Slider position tracking and coil phase sequences
//! - Routine state machine
//! - Error taxonomy, progress notifications and cancellation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod counters;
pub mod error;
pub mod motion;
pub mod naming;
pub mod progress;
pub mod state;

pub use cancel::CancelFlag;
pub use config::{
    CameraSettings, MotionSettings, ProjectName, RoutineSettings, SettingField, SettingsSnapshot,
};
pub use counters::RoutineCounters;
pub use error::{CaptureError, MotionError, PinRole, RoutineError, SettingsError};
pub use motion::{CoilPattern, Direction, SliderPosition, StepDirection};
pub use naming::{ImagePath, NameError};
pub use progress::{Progress, RoutineObserver};
pub use state::{FaultKind, RoutineEvent, RoutineState};
