//! Photorig Hardware Abstraction Layer
//!
//! This crate defines the capabilities the sequencing engine needs from the
//! rig. Chip-level digital outputs and delays come straight from
//! `embedded-hal`; the camera and the image store are rig-specific and are
//! defined here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (photorig-rig)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  photorig-engine / photorig-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  photorig-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  sysfs GPIO,  │       │  mock (tests) │
//! │  rpicam-still │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`OutputPin`] - Digital output (coil phases, turntable direction pins)
//! - [`DelayNs`] - Monotonic async delay used for every timed wait
//! - [`camera::Camera`] - Still capture and pass-through parameters
//! - [`store::ImageStore`] - Output directory management

#![cfg_attr(not(any(test, feature = "mock")), no_std)]
#![deny(unsafe_code)]

pub mod camera;
pub mod store;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use camera::{Camera, CameraError, CameraParameter, ImageFormat, Label};
pub use embedded_hal::digital::{OutputPin, PinState};
pub use embedded_hal_async::delay::DelayNs;
pub use store::{ImageStore, StoreError};
