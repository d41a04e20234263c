//! Mock camera

use std::string::ToString;

use super::{Op, OpLog};
use crate::camera::{Camera, CameraError, CameraParameter, ImageFormat};

/// Mock camera
///
/// Captures succeed unless the attempt number (1-based, counted across the
/// camera's lifetime) matches the configured failure.
#[derive(Debug, Clone)]
pub struct MockCamera {
    log: OpLog,
    attempts: usize,
    fail_on: Option<usize>,
}

impl MockCamera {
    /// Create a camera that always succeeds
    pub fn new(log: &OpLog) -> Self {
        Self {
            log: log.clone(),
            attempts: 0,
            fail_on: None,
        }
    }

    /// Make the `attempt`-th capture fail
    pub fn fail_on_attempt(mut self, attempt: usize) -> Self {
        self.fail_on = Some(attempt);
        self
    }

    /// Number of capture calls so far, failed ones included
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Camera for MockCamera {
    async fn capture(&mut self, path: &str, _format: ImageFormat) -> Result<(), CameraError> {
        self.attempts += 1;
        if self.fail_on == Some(self.attempts) {
            self.log.push(Op::CaptureFailed {
                path: path.to_string(),
            });
            return Err(CameraError::CaptureFailed);
        }
        self.log.push(Op::Capture {
            path: path.to_string(),
        });
        Ok(())
    }

    fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError> {
        self.log.push(Op::Parameter {
            name: parameter.name(),
        });
        Ok(())
    }
}
