//! Hardware drivers for the focus-stacking rig
//!
//! Each controller is generic over the capability traits re-exported by
//! `photorig-hal`, so the same code runs against sysfs GPIO on the rig and
//! against the recording mocks in tests:
//!
//! - [`StepperAxisController`] - 4-phase slider stepper with position tracking
//! - [`TurntableDriveController`] - open-loop, timed turntable drive
//! - [`ShotSequencer`] - capture naming and shot/stack counters

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod camera;
pub mod stepper;
pub mod timing;
pub mod turntable;

pub use camera::ShotSequencer;
pub use stepper::StepperAxisController;
pub use turntable::TurntableDriveController;
