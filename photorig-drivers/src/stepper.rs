//! Slider stepper controller
//!
//! Drives a unipolar stepper through four coil outputs (`in1..in4`). One
//! micro-move walks the full 4-phase sequence, energizing one coil at a time
//! for the phase delay. The controller owns the slider position and updates
//! it once per completed cycle.
//!
//! # Usage
//!
//! ```ignore
//! let mut slider = StepperAxisController::new(coils, delay, Duration::from_millis(2));
//! slider.move_forward(10, &cancel).await?;
//! slider.go_home(&cancel).await?;
//! assert!(slider.position().is_home());
//! ```
//!
//! Coils are always switched off when a move returns, whether it finished,
//! was cancelled, or hit a GPIO error.

use core::time::Duration;

use log::{debug, warn};
use photorig_core::motion::{CoilPattern, DE_ENERGIZED};
use photorig_core::{CancelFlag, MotionError, PinRole, SliderPosition, StepDirection};
use photorig_hal::{DelayNs, OutputPin, PinState};

use crate::timing::wait;

/// Slider stepper controller
pub struct StepperAxisController<P, D> {
    coils: [P; 4],
    delay: D,
    phase_delay: Duration,
    position: SliderPosition,
}

impl<P: OutputPin, D: DelayNs> StepperAxisController<P, D> {
    /// Create a controller at home with the given phase hold time
    pub fn new(coils: [P; 4], delay: D, phase_delay: Duration) -> Self {
        Self {
            coils,
            delay,
            phase_delay,
            position: SliderPosition::HOME,
        }
    }

    /// Current position in micro-moves from home
    pub fn position(&self) -> SliderPosition {
        self.position
    }

    /// Current phase hold time
    pub fn phase_delay(&self) -> Duration {
        self.phase_delay
    }

    /// Change the phase hold time for subsequent moves
    pub fn set_phase_delay(&mut self, phase_delay: Duration) {
        self.phase_delay = phase_delay;
    }

    /// Declare the current location as home without moving
    pub fn set_home(&mut self) {
        debug!("slider home set at {}", self.position.steps());
        self.position.set_home();
    }

    /// Move `steps` micro-moves away from home
    pub async fn move_forward(&mut self, steps: u32, cancel: &CancelFlag) -> Result<(), MotionError> {
        self.move_steps(StepDirection::Forward, steps, cancel).await
    }

    /// Move `steps` micro-moves towards home
    pub async fn move_reverse(&mut self, steps: u32, cancel: &CancelFlag) -> Result<(), MotionError> {
        self.move_steps(StepDirection::Reverse, steps, cancel).await
    }

    /// Return to position 0 along the same phase path
    ///
    /// No-op when already home. A negative position is undone with a
    /// forward move.
    pub async fn go_home(&mut self, cancel: &CancelFlag) -> Result<(), MotionError> {
        match self.position.homing_move() {
            Some((direction, steps)) => self.move_steps(direction, steps, cancel).await,
            None => Ok(()),
        }
    }

    /// Move in `direction`, then switch the coils off
    ///
    /// The flag is checked before every micro-move, so a cancelled move
    /// stops on a cycle boundary with the position matching the steps taken.
    pub async fn move_steps(
        &mut self,
        direction: StepDirection,
        steps: u32,
        cancel: &CancelFlag,
    ) -> Result<(), MotionError> {
        if steps == 0 {
            return Ok(());
        }

        debug!("slider {:?} {} from {}", direction, steps, self.position.steps());
        let moved = self.drive(direction, steps, cancel).await;
        let released = self.disable();

        moved?;
        released
    }

    async fn drive(
        &mut self,
        direction: StepDirection,
        steps: u32,
        cancel: &CancelFlag,
    ) -> Result<(), MotionError> {
        for _ in 0..steps {
            if cancel.is_cancelled() {
                debug!("slider move cancelled at {}", self.position.steps());
                return Err(MotionError::Cancelled);
            }
            for pattern in direction.sequence() {
                self.apply(pattern)?;
                wait(&mut self.delay, self.phase_delay).await;
            }
            self.position.record_step(direction);
        }
        Ok(())
    }

    /// Switch all four coils off
    ///
    /// Every coil is attempted even if an earlier one fails; the first
    /// failure is returned.
    pub fn disable(&mut self) -> Result<(), MotionError> {
        let mut result = Ok(());
        for (index, level) in DE_ENERGIZED.iter().enumerate() {
            if let Err(e) = self.write_coil(index, *level) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn apply(&mut self, pattern: &CoilPattern) -> Result<(), MotionError> {
        for (index, level) in pattern.iter().enumerate() {
            self.write_coil(index, *level)?;
        }
        Ok(())
    }

    fn write_coil(&mut self, index: usize, high: bool) -> Result<(), MotionError> {
        self.coils[index]
            .set_state(PinState::from(high))
            .map_err(|e| {
                warn!("coil in{} write failed: {:?}", index + 1, e);
                MotionError::Gpio(PinRole::Coil(index as u8 + 1))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use photorig_hal::mock::{MockDelay, MockPin, OpLog};

    const COIL_IDS: [u8; 4] = [17, 27, 22, 23];

    fn slider(log: &OpLog) -> StepperAxisController<MockPin, MockDelay> {
        let coils = COIL_IDS.map(|id| MockPin::new(id, log));
        StepperAxisController::new(coils, MockDelay::new(log), Duration::from_millis(2))
    }

    fn high_coil_per_phase(log: &OpLog) -> Vec<u8> {
        // Each phase writes all four coils; collect the one set high
        log.pin_writes()
            .chunks(4)
            .filter_map(|chunk| chunk.iter().find(|(_, high)| *high).map(|(id, _)| *id))
            .collect()
    }

    #[test]
    fn test_forward_phase_order() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(2, &cancel)).unwrap();

        assert_eq!(slider.position().steps(), 2);
        assert_eq!(
            high_coil_per_phase(&log),
            vec![17, 27, 22, 23, 17, 27, 22, 23]
        );
    }

    #[test]
    fn test_reverse_phase_order() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_reverse(1, &cancel)).unwrap();

        assert_eq!(slider.position().steps(), -1);
        assert_eq!(high_coil_per_phase(&log), vec![23, 22, 27, 17]);
    }

    #[test]
    fn test_move_blocks_for_every_phase() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(10, &cancel)).unwrap();

        assert_eq!(log.total_delay_ns(), 10 * 4 * 2_000_000);
    }

    #[test]
    fn test_coils_off_after_move() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(3, &cancel)).unwrap();

        let writes = log.pin_writes();
        let tail = &writes[writes.len() - 4..];
        assert!(tail.iter().all(|(_, high)| !high));
        assert!(slider.coils.iter().all(|pin| !pin.is_high()));
    }

    #[test]
    fn test_zero_steps_is_noop() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(0, &cancel)).unwrap();
        block_on(slider.go_home(&cancel)).unwrap();

        assert!(log.is_empty());
        assert!(slider.position().is_home());
    }

    #[test]
    fn test_go_home_from_both_sides() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(7, &cancel)).unwrap();
        block_on(slider.go_home(&cancel)).unwrap();
        assert!(slider.position().is_home());

        block_on(slider.move_reverse(4, &cancel)).unwrap();
        block_on(slider.go_home(&cancel)).unwrap();
        assert!(slider.position().is_home());
    }

    #[test]
    fn test_set_home_does_not_move() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(5, &cancel)).unwrap();
        log.clear();

        slider.set_home();

        assert!(slider.position().is_home());
        assert!(log.is_empty());
    }

    #[test]
    fn test_cancel_stops_and_deenergizes() {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = block_on(slider.move_forward(5, &cancel));

        assert_eq!(result, Err(MotionError::Cancelled));
        assert!(slider.position().is_home());
        // Only the release writes happened
        assert_eq!(log.pin_writes(), COIL_IDS.map(|id| (id, false)).to_vec());
    }

    #[test]
    fn test_gpio_failure_surfaces_and_releases() {
        let log = OpLog::new();
        let coils = [
            MockPin::new(17, &log),
            MockPin::failing_after(27, 5, &log),
            MockPin::new(22, &log),
            MockPin::new(23, &log),
        ];
        let mut slider =
            StepperAxisController::new(coils, MockDelay::new(&log), Duration::from_millis(2));
        let cancel = CancelFlag::new();

        let result = block_on(slider.move_forward(3, &cancel));

        assert_eq!(result, Err(MotionError::Gpio(PinRole::Coil(2))));
        // The failing cycle is not counted
        assert_eq!(slider.position().steps(), 1);
        assert!(!slider.coils[0].is_high());
        assert!(!slider.coils[2].is_high());
        assert!(!slider.coils[3].is_high());
    }
}
