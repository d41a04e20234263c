//! Dry-run hardware
//!
//! Pins only log their level; the camera writes empty placeholder files so
//! the directory layout of a run can be inspected.

use std::convert::Infallible;
use std::fs::File;
use std::path::PathBuf;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, info, trace};
use photorig_hal::{Camera, CameraError, CameraParameter, ImageFormat};

#[derive(Debug)]
pub struct SimPin {
    pin: u32,
    high: bool,
}

impl SimPin {
    pub fn new(pin: u32) -> Self {
        Self { pin, high: false }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        trace!("GPIO {} low", self.pin);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        trace!("GPIO {} high", self.pin);
        self.high = true;
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimCamera {
    root: PathBuf,
}

impl SimCamera {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Camera for SimCamera {
    async fn capture(&mut self, path: &str, _format: ImageFormat) -> Result<(), CameraError> {
        File::create(self.root.join(path)).map_err(|_| CameraError::Io)?;
        info!("[dry run] captured {}", path);
        Ok(())
    }

    fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError> {
        debug!("[dry run] {:?}", parameter);
        Ok(())
    }
}
