//! Error taxonomy
//!
//! Every routine failure carries enough context (stack number, shot index)
//! for the operator to find the last image that was written. Nothing is
//! retried.

use core::fmt;

use photorig_hal::{CameraError, StoreError};

use crate::config::SettingField;
use crate::naming::NameError;
use crate::state::{FaultKind, RoutineState};

/// Output pin that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// Slider coil `in1..in4` (1-based)
    Coil(u8),
    /// Turntable clockwise drive
    Clockwise,
    /// Turntable counter-clockwise drive
    CounterClockwise,
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRole::Coil(n) => write!(f, "coil in{}", n),
            PinRole::Clockwise => f.write_str("turntable cw"),
            PinRole::CounterClockwise => f.write_str("turntable ccw"),
        }
    }
}

/// Slider or turntable motion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Writing an output pin failed
    Gpio(PinRole),
    /// Stopped early on a cancellation request
    Cancelled,
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Gpio(pin) => write!(f, "failed to drive {}", pin),
            MotionError::Cancelled => f.write_str("motion cancelled"),
        }
    }
}

/// Shot sequencer failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Camera did not produce an image
    Camera(CameraError),
    /// Stack directory already present
    DirectoryExists,
    /// Image store failed
    Storage(StoreError),
    /// Generated path too long
    Naming(NameError),
}

impl From<CameraError> for CaptureError {
    fn from(e: CameraError) -> Self {
        CaptureError::Camera(e)
    }
}

impl From<NameError> for CaptureError {
    fn from(e: NameError) -> Self {
        CaptureError::Naming(e)
    }
}

impl From<StoreError> for CaptureError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists => CaptureError::DirectoryExists,
            other => CaptureError::Storage(other),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Camera(e) => write!(f, "capture failed: {}", e),
            CaptureError::DirectoryExists => f.write_str("directory already exists"),
            CaptureError::Storage(e) => write!(f, "storage error: {}", e),
            CaptureError::Naming(e) => write!(f, "{}", e),
        }
    }
}

/// Rejected settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Value out of range; the previous value was kept
    InvalidSetting(SettingField),
    /// A routine is running
    Locked,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidSetting(field) => write!(f, "invalid value for {}", field),
            SettingsError::Locked => f.write_str("settings are locked while a routine runs"),
        }
    }
}

/// Routine failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineError {
    /// Camera failed; `shot` is the index that was not written
    Capture {
        stack: u32,
        shot: u32,
        error: CameraError,
    },
    /// Stack directory collided before any motion
    DirectoryExists { stack: u32 },
    /// GPIO failure while moving
    Motion {
        stack: u32,
        shot: u32,
        error: MotionError,
    },
    /// Operator cancelled the routine
    Cancelled { stack: u32, shot: u32 },
    /// Image store failure
    Storage(StoreError),
    /// Generated path too long
    Naming,
    /// Camera failure outside a stack (test shot, parameter update)
    Camera(CameraError),
    /// Another routine is in progress or a fault awaits acknowledgement
    Busy(RoutineState),
    /// Settings rejected
    Settings(SettingsError),
}

impl RoutineError {
    /// Build a routine error from a motion failure at a stack position
    pub fn from_motion(error: MotionError, stack: u32, shot: u32) -> Self {
        match error {
            MotionError::Cancelled => RoutineError::Cancelled { stack, shot },
            error => RoutineError::Motion { stack, shot, error },
        }
    }

    /// Build a routine error from a sequencer failure at a stack position
    pub fn from_capture(error: CaptureError, stack: u32, shot: u32) -> Self {
        match error {
            CaptureError::Camera(error) => RoutineError::Capture { stack, shot, error },
            CaptureError::DirectoryExists => RoutineError::DirectoryExists { stack },
            CaptureError::Storage(e) => RoutineError::Storage(e),
            CaptureError::Naming(_) => RoutineError::Naming,
        }
    }

    /// Fault recorded in the state machine, `None` if the routine never started
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            RoutineError::Capture { .. } => Some(FaultKind::Camera),
            RoutineError::DirectoryExists { .. } => Some(FaultKind::DirectoryExists),
            RoutineError::Motion { .. } => Some(FaultKind::Gpio),
            RoutineError::Cancelled { .. } => Some(FaultKind::Cancelled),
            RoutineError::Storage(_) => Some(FaultKind::Storage),
            RoutineError::Naming => Some(FaultKind::Naming),
            RoutineError::Camera(_) | RoutineError::Busy(_) | RoutineError::Settings(_) => None,
        }
    }
}

impl From<SettingsError> for RoutineError {
    fn from(e: SettingsError) -> Self {
        RoutineError::Settings(e)
    }
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineError::Capture { stack, shot, error } => {
                write!(f, "stack {} shot {}: {}", stack, shot, error)
            }
            RoutineError::DirectoryExists { stack } => {
                write!(f, "stack {}: directory already exists", stack)
            }
            RoutineError::Motion { stack, shot, error } => {
                write!(f, "stack {} shot {}: {}", stack, shot, error)
            }
            RoutineError::Cancelled { stack, shot } => {
                write!(f, "cancelled at stack {} shot {}", stack, shot)
            }
            RoutineError::Storage(e) => write!(f, "storage error: {}", e),
            RoutineError::Naming => f.write_str("generated path too long"),
            RoutineError::Camera(e) => write!(f, "camera error: {}", e),
            RoutineError::Busy(state) => write!(f, "rig busy ({})", state),
            RoutineError::Settings(e) => write!(f, "{}", e),
        }
    }
}
