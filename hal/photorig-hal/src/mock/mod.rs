//! Mock rig implementation for testing
//!
//! Every mock writes into a shared [`OpLog`], so a test can assert on the
//! exact interleaving of coil writes, waits, directory creation and captures
//! across all devices of the rig.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use photorig_hal::mock::{MockPin, OpLog};
//! use photorig_hal::OutputPin;
//!
//! let log = OpLog::new();
//! let mut pin = MockPin::new(17, &log);
//! pin.set_high().unwrap();
//! assert_eq!(log.pin_writes(), vec![(17, true)]);
//! ```

extern crate std;

mod camera;
mod delay;
mod gpio;
mod store;

use std::cell::RefCell;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

pub use camera::MockCamera;
pub use delay::MockDelay;
pub use gpio::{MockPin, MockPinError};
pub use store::MockStore;

/// One recorded hardware operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Output pin driven to a level
    Pin { pin: u8, high: bool },
    /// Delay awaited, in nanoseconds
    Delay { ns: u64 },
    /// Directory created by the store
    CreateDir { dir: String },
    /// Still captured into a path
    Capture { path: String },
    /// Capture attempted but failed
    CaptureFailed { path: String },
    /// Camera parameter forwarded
    Parameter { name: &'static str },
}

/// Shared, ordered log of hardware operations
#[derive(Debug, Clone, Default)]
pub struct OpLog(Rc<RefCell<Vec<Op>>>);

impl OpLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    /// Snapshot of all recorded operations
    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Successful capture paths, in order
    pub fn captures(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Capture { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Created directories, in order
    pub fn created_dirs(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::CreateDir { dir } => Some(dir.clone()),
                _ => None,
            })
            .collect()
    }

    /// Pin writes as `(pin, high)` pairs, in order
    pub fn pin_writes(&self) -> Vec<(u8, bool)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Pin { pin, high } => Some((*pin, *high)),
                _ => None,
            })
            .collect()
    }

    /// Sum of all awaited delays in nanoseconds
    pub fn total_delay_ns(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|op| match op {
                Op::Delay { ns } => *ns,
                _ => 0,
            })
            .sum()
    }

    /// Number of recorded operations
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, DelayNs, ImageFormat, ImageStore, OutputPin, StoreError};
    use embassy_futures::block_on;

    #[test]
    fn test_log_is_shared_between_devices() {
        let log = OpLog::new();
        let mut pin = MockPin::new(4, &log);
        let mut delay = MockDelay::new(&log);

        pin.set_high().unwrap();
        block_on(delay.delay_ms(3));
        pin.set_low().unwrap();

        assert_eq!(
            log.ops(),
            vec![
                Op::Pin { pin: 4, high: true },
                Op::Delay { ns: 3_000_000 },
                Op::Pin { pin: 4, high: false },
            ]
        );
        assert_eq!(log.total_delay_ns(), 3_000_000);
    }

    #[test]
    fn test_camera_failure_injection() {
        let log = OpLog::new();
        let mut camera = MockCamera::new(&log).fail_on_attempt(2);

        assert!(block_on(camera.capture("a.jpg", ImageFormat::Jpeg)).is_ok());
        assert!(block_on(camera.capture("b.jpg", ImageFormat::Jpeg)).is_err());
        assert!(block_on(camera.capture("c.jpg", ImageFormat::Jpeg)).is_ok());

        assert_eq!(log.captures(), vec!["a.jpg", "c.jpg"]);
        assert_eq!(camera.attempts(), 3);
    }

    #[test]
    fn test_store_rejects_existing_dir() {
        let log = OpLog::new();
        let mut store = MockStore::new(&log).with_existing("shot_1");

        assert_eq!(store.create_dir("shot_1"), Err(StoreError::AlreadyExists));
        assert!(store.create_dir("shot_2").is_ok());
        assert!(store.ensure_dir("shot_2").is_ok());
        assert!(store.dir_exists("shot_2"));
        assert_eq!(log.created_dirs(), vec!["shot_2"]);
    }
}
