//! Slider and turntable motion types
//!
//! Position tracking is open loop: the slider position is the count of
//! completed coil cycles since the last declared home, and the turntable
//! only knows which way it was told to turn.

pub mod direction;
pub mod phase;
pub mod position;

pub use direction::{Direction, ParseDirectionError};
pub use phase::{CoilPattern, StepDirection, COIL_COUNT, DE_ENERGIZED};
pub use position::SliderPosition;
