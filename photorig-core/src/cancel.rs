//! Cooperative cancellation
//!
//! Routines poll the flag between discrete hardware operations: after every
//! slider micro-move, after every shot, and between slices of long waits.
//! A coil pulse in progress is never cut short.

use core::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation request
///
/// Usually lives in a `static` so the console side can raise it while the
/// routine task is busy.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    /// Create a flag with no pending request
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Request cancellation of the running routine
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear a pending request before starting new work
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
