//! Routine engine for the focus-stacking rig
//!
//! [`RigEngine`] is the single owner of everything a routine touches:
//! settings, slider position, shot and stack counters, and the routine
//! state. Board support code provides the hardware through a
//! [`RigPlatform`] and drives the engine from one task.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod engine;
mod platform;
mod routine;
mod stack;

pub use engine::RigEngine;
pub use platform::{RigParts, RigPlatform};
