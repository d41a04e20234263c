//! Turntable drive controller
//!
//! The turntable motor has one enable pin per direction and no position
//! feedback. A rotation step keeps the selected pin high for a fixed drive
//! time; drift is accepted.

use core::time::Duration;

use log::{debug, warn};
use photorig_core::{CancelFlag, Direction, MotionError, PinRole};
use photorig_hal::{DelayNs, OutputPin};

use crate::timing::cancellable_wait;

/// Turntable drive controller
pub struct TurntableDriveController<P, D> {
    clockwise: P,
    counter_clockwise: P,
    delay: D,
    drive_time: Duration,
}

impl<P: OutputPin, D: DelayNs> TurntableDriveController<P, D> {
    /// Create a controller; both pins are expected low
    pub fn new(clockwise: P, counter_clockwise: P, delay: D, drive_time: Duration) -> Self {
        Self {
            clockwise,
            counter_clockwise,
            delay,
            drive_time,
        }
    }

    /// How long one rotation step keeps the motor powered
    pub fn drive_time(&self) -> Duration {
        self.drive_time
    }

    /// Change the drive time for subsequent steps
    pub fn set_drive_time(&mut self, drive_time: Duration) {
        self.drive_time = drive_time;
    }

    pub async fn drive_clockwise(&mut self, cancel: &CancelFlag) -> Result<(), MotionError> {
        self.drive(Direction::Clockwise, cancel).await
    }

    pub async fn drive_counter_clockwise(&mut self, cancel: &CancelFlag) -> Result<(), MotionError> {
        self.drive(Direction::CounterClockwise, cancel).await
    }

    /// Power the motor in `direction` for the drive time
    ///
    /// The opposite pin is driven low before the selected one goes high.
    /// Both pins are low again when this returns, including on
    /// cancellation or error.
    pub async fn drive(&mut self, direction: Direction, cancel: &CancelFlag) -> Result<(), MotionError> {
        debug!("turntable {} for {:?}", direction, self.drive_time);

        let powered = self.power(direction, cancel).await;
        let stopped = self.stop();

        powered?;
        stopped
    }

    async fn power(&mut self, direction: Direction, cancel: &CancelFlag) -> Result<(), MotionError> {
        let (active, active_role, idle, idle_role) = match direction {
            Direction::Clockwise => (
                &mut self.clockwise,
                PinRole::Clockwise,
                &mut self.counter_clockwise,
                PinRole::CounterClockwise,
            ),
            Direction::CounterClockwise => (
                &mut self.counter_clockwise,
                PinRole::CounterClockwise,
                &mut self.clockwise,
                PinRole::Clockwise,
            ),
        };

        idle.set_low().map_err(|e| gpio_error(idle_role, e))?;
        active.set_high().map_err(|e| gpio_error(active_role, e))?;

        cancellable_wait(&mut self.delay, self.drive_time, cancel).await
    }

    /// Drive both direction pins low
    ///
    /// Both pins are attempted; the first failure is returned.
    pub fn stop(&mut self) -> Result<(), MotionError> {
        let cw = self
            .clockwise
            .set_low()
            .map_err(|e| gpio_error(PinRole::Clockwise, e));
        let ccw = self
            .counter_clockwise
            .set_low()
            .map_err(|e| gpio_error(PinRole::CounterClockwise, e));
        cw.and(ccw)
    }
}

fn gpio_error<E: core::fmt::Debug>(role: PinRole, e: E) -> MotionError {
    warn!("{} write failed: {:?}", role, e);
    MotionError::Gpio(role)
}
