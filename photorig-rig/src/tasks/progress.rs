//! Progress reporting task

use log::{debug, info};
use photorig_core::Progress;

use crate::channels::PROGRESS;

/// Log every progress notification from the engine
pub async fn progress_task() {
    loop {
        match PROGRESS.receive().await {
            Progress::StateChanged(state) => debug!("state: {}", state),
            Progress::SliderMoved { position } => info!("slider at {}", position),
            Progress::ShotCaptured {
                stack,
                shot,
                next_shot,
            } => info!("stack {} shot {} captured (next shot {})", stack, shot, next_shot),
            Progress::TestShotCaptured { number, next } => {
                info!("test shot {} captured (next {})", number, next)
            }
            Progress::StackCompleted { stack, next_stack } => {
                info!("stack {} complete (next stack {})", stack, next_stack)
            }
            Progress::Rotated { direction } => info!("turntable rotated {}", direction),
            Progress::RoutineCompleted { stacks } => info!("routine complete: {} stacks", stacks),
        }
    }
}
