//! Full multi-stack session
//!
//! The current slider location becomes home, then for each stack: shoot,
//! turn the turntable one step, bring the slider back home. The stack count
//! is the cached value from the settings.

use log::info;
use photorig_core::{Progress, RoutineError, RoutineEvent};

use crate::engine::RigEngine;
use crate::platform::RigPlatform;

impl<'c, P: RigPlatform> RigEngine<'c, P> {
    /// Run the whole session and return the number of stacks shot
    ///
    /// Any failure halts the session; there is no resume.
    pub async fn run_full_routine(&mut self) -> Result<u32, RoutineError> {
        self.begin_routine()?;
        let result = self.shoot_all_stacks().await;
        self.end_routine(result)
    }

    async fn shoot_all_stacks(&mut self) -> Result<u32, RoutineError> {
        let stacks = self.settings.number_stacks();
        let shots = self.settings.number_shots();
        let direction = self.settings.direction();
        info!(
            "routine: {} stacks of {} shots, turning {}",
            stacks, shots, direction
        );

        self.slider.set_home();
        self.report_slider();

        for index in 0..stacks {
            self.shoot_stack(shots).await?;

            self.apply(RoutineEvent::StartRotation);
            self.turntable
                .drive(direction, self.cancel)
                .await
                .map_err(|e| self.motion_error(e))?;
            self.notify(Progress::Rotated { direction });

            self.apply(RoutineEvent::RotationFinished);
            let homed = self.slider.go_home(self.cancel).await;
            self.report_slider();
            homed.map_err(|e| self.motion_error(e))?;
            self.check_cancel()?;

            if index + 1 < stacks {
                self.apply(RoutineEvent::NextStack);
            } else {
                self.apply(RoutineEvent::RoutineFinished);
            }
        }

        info!("routine complete after {} stacks", stacks);
        self.notify(Progress::RoutineCompleted { stacks });
        Ok(stacks)
    }
}
