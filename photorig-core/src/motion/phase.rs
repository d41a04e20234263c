//! Coil phase sequences for the 4-wire slider stepper
//!
//! One micro-move energizes each coil once, in order. Each phase is held for
//! the configured phase delay before the next one is applied.

/// Number of coil outputs on the slider driver
pub const COIL_COUNT: usize = 4;

/// Levels for coils `in1..in4`, `true` = energized
pub type CoilPattern = [bool; COIL_COUNT];

/// All coils off
pub const DE_ENERGIZED: CoilPattern = [false; COIL_COUNT];

const FORWARD_SEQUENCE: [CoilPattern; 4] = [
    [true, false, false, false],
    [false, true, false, false],
    [false, false, true, false],
    [false, false, false, true],
];

const REVERSE_SEQUENCE: [CoilPattern; 4] = [
    [false, false, false, true],
    [false, false, true, false],
    [false, true, false, false],
    [true, false, false, false],
];

/// Slider travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Away from home, position increases
    Forward,
    /// Towards home, position decreases
    Reverse,
}

impl StepDirection {
    /// Phase patterns for one micro-move in this direction
    pub fn sequence(self) -> &'static [CoilPattern; 4] {
        match self {
            StepDirection::Forward => &FORWARD_SEQUENCE,
            StepDirection::Reverse => &REVERSE_SEQUENCE,
        }
    }

    /// Position change per completed micro-move
    pub fn delta(self) -> i32 {
        match self {
            StepDirection::Forward => 1,
            StepDirection::Reverse => -1,
        }
    }
}
