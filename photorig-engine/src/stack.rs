//! Single focus stack
//!
//! `Idle -> Shooting -> [capture, settle, advance, settle] x n -> StackComplete`
//!
//! The stack directory is created before anything moves, so a name
//! collision aborts with the slider untouched. The slider is left at the end
//! of the stack; returning it is up to the caller.

use log::info;
use photorig_core::{Progress, RoutineError, RoutineEvent, SettingField, SettingsError};
use photorig_drivers::timing::cancellable_wait;

use crate::engine::RigEngine;
use crate::platform::RigPlatform;

impl<'c, P: RigPlatform> RigEngine<'c, P> {
    /// Shoot one stack of `number_shots` images
    ///
    /// On success the stack counter has moved on and the shot counter is
    /// back at 1. On failure the counters stay where the stack stopped and
    /// the engine is aborted. A stack of zero shots is rejected before
    /// anything is created or moved.
    pub async fn run_stack(&mut self, number_shots: u32) -> Result<(), RoutineError> {
        if number_shots == 0 {
            return Err(RoutineError::Settings(SettingsError::InvalidSetting(
                SettingField::NumberShots,
            )));
        }
        self.begin_routine()?;
        let result = self.shoot_stack(number_shots).await;
        if result.is_ok() {
            self.apply(RoutineEvent::RoutineFinished);
        }
        self.end_routine(result)
    }

    pub(crate) async fn shoot_stack(&mut self, number_shots: u32) -> Result<(), RoutineError> {
        let project = self.settings.project_name().clone();
        let motion = *self.settings.motion();
        let stack = self.shots.counters().stack_number();

        self.apply(RoutineEvent::StartStack);
        let dir = self
            .shots
            .begin_stack(&project)
            .map_err(|e| self.capture_error(e))?;
        info!("stack {}: {} shots into {}", stack, number_shots, dir.as_str());

        for _ in 0..number_shots {
            let shot = self.shots.counters().shot_number();
            self.shots
                .capture_stack_shot(&project, &dir)
                .await
                .map_err(|e| self.capture_error(e))?;
            self.notify(Progress::ShotCaptured {
                stack,
                shot,
                next_shot: self.shots.counters().shot_number(),
            });
            self.check_cancel()?;

            self.settle().await?;
            let moved = self.slider.move_forward(motion.camera_movement, self.cancel).await;
            self.report_slider();
            moved.map_err(|e| self.motion_error(e))?;
            self.settle().await?;
        }

        self.shots.finish_stack();
        self.notify(Progress::StackCompleted {
            stack,
            next_stack: self.shots.counters().stack_number(),
        });
        self.apply(RoutineEvent::StackFinished);
        Ok(())
    }

    async fn settle(&mut self) -> Result<(), RoutineError> {
        let pause = self.settings.motion().shot_pause;
        cancellable_wait(&mut self.delay, pause, self.cancel)
            .await
            .map_err(|e| self.motion_error(e))
    }
}
