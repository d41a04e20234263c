//! Slider position tracking

use super::phase::StepDirection;

/// Signed micro-move count relative to the last declared home
///
/// Only the stepper controller mutates this, one unit per completed coil
/// cycle. There is no feedback; the value equals the physical offset only as
/// long as no steps were lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderPosition(i32);

impl SliderPosition {
    /// The home position
    pub const HOME: Self = Self(0);

    /// Create a position from a raw micro-move count
    pub const fn new(steps: i32) -> Self {
        Self(steps)
    }

    /// Raw micro-move count
    pub fn steps(&self) -> i32 {
        self.0
    }

    /// Check if the slider sits at home
    pub fn is_home(&self) -> bool {
        self.0 == 0
    }

    /// Record one completed micro-move
    pub fn record_step(&mut self, direction: StepDirection) {
        self.0 = self.0.saturating_add(direction.delta());
    }

    /// Declare the current physical location as home
    pub fn set_home(&mut self) {
        self.0 = 0;
    }

    /// Direction and distance needed to get back home
    ///
    /// Returns `None` when already at home.
    pub fn homing_move(&self) -> Option<(StepDirection, u32)> {
        match self.0 {
            0 => None,
            p if p > 0 => Some((StepDirection::Reverse, p.unsigned_abs())),
            p => Some((StepDirection::Forward, p.unsigned_abs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_steps() {
        let mut pos = SliderPosition::HOME;
        pos.record_step(StepDirection::Forward);
        pos.record_step(StepDirection::Forward);
        pos.record_step(StepDirection::Reverse);
        assert_eq!(pos.steps(), 1);
        assert!(!pos.is_home());
    }

    #[test]
    fn test_homing_move() {
        assert_eq!(SliderPosition::HOME.homing_move(), None);
        assert_eq!(
            SliderPosition::new(12).homing_move(),
            Some((StepDirection::Reverse, 12))
        );
        assert_eq!(
            SliderPosition::new(-3).homing_move(),
            Some((StepDirection::Forward, 3))
        );
    }

    #[test]
    fn test_set_home() {
        let mut pos = SliderPosition::new(40);
        pos.set_home();
        assert!(pos.is_home());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_homing_move_undoes_any_walk(steps in proptest::collection::vec(any::<bool>(), 0..200)) {
                let mut pos = SliderPosition::HOME;
                for forward in steps {
                    let dir = if forward { StepDirection::Forward } else { StepDirection::Reverse };
                    pos.record_step(dir);
                }

                if let Some((dir, count)) = pos.homing_move() {
                    for _ in 0..count {
                        pos.record_step(dir);
                    }
                }
                prop_assert!(pos.is_home());
            }
        }
    }
}
