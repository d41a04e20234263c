//! Progress notifications
//!
//! The engine reports every externally visible step to a
//! [`RoutineObserver`]. Observers must not block; on the rig the observer
//! forwards into a channel drained by a separate task.

use crate::motion::Direction;
use crate::state::RoutineState;

/// One progress notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    /// Routine state changed
    StateChanged(RoutineState),
    /// Slider move or homing finished at this position
    SliderMoved { position: i32 },
    /// Stack image written; `next_shot` is the updated counter
    ShotCaptured { stack: u32, shot: u32, next_shot: u32 },
    /// Test image written; `next` is the updated counter
    TestShotCaptured { number: u32, next: u32 },
    /// Stack finished; `next_stack` is the updated counter
    StackCompleted { stack: u32, next_stack: u32 },
    /// Turntable drive finished
    Rotated { direction: Direction },
    /// Full routine finished
    RoutineCompleted { stacks: u32 },
}

/// Receiver of progress notifications
pub trait RoutineObserver {
    /// Called synchronously after each step
    fn notify(&mut self, progress: Progress);
}

impl<T: RoutineObserver + ?Sized> RoutineObserver for &mut T {
    fn notify(&mut self, progress: Progress) {
        (**self).notify(progress);
    }
}
