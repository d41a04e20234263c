//! Engine context, manual operations and guarded configuration

use log::{debug, error, info, warn};
use photorig_core::config::RoutineSettings;
use photorig_core::{
    CancelFlag, CaptureError, Direction, FaultKind, MotionError, Progress, RoutineCounters,
    RoutineError, RoutineEvent, RoutineObserver, RoutineState, SettingsError, SliderPosition,
};
use photorig_drivers::{ShotSequencer, StepperAxisController, TurntableDriveController};
use photorig_hal::CameraParameter;

use crate::platform::{RigParts, RigPlatform};

/// The rig's routine engine
///
/// Manual operations are refused while a routine runs. A routine that
/// fails leaves the engine in [`RoutineState::Aborted`]; call
/// [`acknowledge_fault`](Self::acknowledge_fault) before starting another.
///
/// Dropping a routine future part way leaves the settings locked and the
/// state busy. Stop routines through the [`CancelFlag`] instead.
pub struct RigEngine<'c, P: RigPlatform> {
    pub(crate) settings: RoutineSettings,
    pub(crate) slider: StepperAxisController<P::SliderPin, P::Delay>,
    pub(crate) turntable: TurntableDriveController<P::TurntablePin, P::Delay>,
    pub(crate) shots: ShotSequencer<P::Camera, P::Store>,
    pub(crate) delay: P::Delay,
    observer: P::Observer,
    state: RoutineState,
    pub(crate) cancel: &'c CancelFlag,
}

impl<'c, P: RigPlatform> RigEngine<'c, P> {
    /// Assemble an engine; the slider position starts at home
    pub fn new(parts: RigParts<P>, settings: RoutineSettings, cancel: &'c CancelFlag) -> Self {
        let motion = *settings.motion();
        Self {
            slider: StepperAxisController::new(
                parts.slider_coils,
                parts.delay.clone(),
                motion.sleep_time,
            ),
            turntable: TurntableDriveController::new(
                parts.turntable_cw,
                parts.turntable_ccw,
                parts.delay.clone(),
                motion.turntable_drive_time(),
            ),
            shots: ShotSequencer::new(parts.camera, parts.store, settings.image_format()),
            delay: parts.delay,
            observer: parts.observer,
            state: RoutineState::Idle,
            settings,
            cancel,
        }
    }

    // Observation

    pub fn state(&self) -> RoutineState {
        self.state
    }

    pub fn slider_position(&self) -> SliderPosition {
        self.slider.position()
    }

    pub fn counters(&self) -> RoutineCounters {
        self.shots.counters()
    }

    pub fn settings(&self) -> &RoutineSettings {
        &self.settings
    }

    // Configuration

    /// Change settings between routines
    ///
    /// Returns [`SettingsError::Locked`] while a routine holds the
    /// settings. New timing values reach the motion controllers right away.
    pub fn configure<R>(
        &mut self,
        change: impl FnOnce(&mut RoutineSettings) -> Result<R, SettingsError>,
    ) -> Result<R, SettingsError> {
        if self.settings.is_locked() {
            return Err(SettingsError::Locked);
        }
        let result = change(&mut self.settings)?;
        self.sync_drivers();
        Ok(result)
    }

    /// Store a camera parameter and forward it to the camera
    pub fn set_camera_parameter(&mut self, parameter: &CameraParameter) -> Result<(), RoutineError> {
        self.settings.set_camera_parameter(parameter)?;
        self.shots
            .set_parameter(parameter)
            .map_err(RoutineError::Camera)
    }

    /// Forward all stored camera settings, e.g. after start-up or import
    pub fn apply_camera_settings(&mut self) -> Result<(), RoutineError> {
        self.shots
            .apply_camera_settings(self.settings.camera())
            .map_err(RoutineError::Camera)
    }

    pub(crate) fn sync_drivers(&mut self) {
        let motion = *self.settings.motion();
        self.slider.set_phase_delay(motion.sleep_time);
        self.turntable.set_drive_time(motion.turntable_drive_time());
        self.shots.set_format(self.settings.image_format());
    }

    // Manual operations

    fn ensure_not_busy(&self) -> Result<(), RoutineError> {
        if self.state.is_busy() {
            Err(RoutineError::Busy(self.state))
        } else {
            Ok(())
        }
    }

    pub(crate) fn motion_error(&self, error: MotionError) -> RoutineError {
        let counters = self.shots.counters();
        RoutineError::from_motion(error, counters.stack_number(), counters.shot_number())
    }

    pub(crate) fn capture_error(&self, error: CaptureError) -> RoutineError {
        let counters = self.shots.counters();
        RoutineError::from_capture(error, counters.stack_number(), counters.shot_number())
    }

    /// Move the slider away from home
    pub async fn move_forward(&mut self, steps: u32) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        let result = self.slider.move_forward(steps, self.cancel).await;
        self.report_slider();
        result.map_err(|e| self.motion_error(e))
    }

    /// Move the slider towards home
    pub async fn move_reverse(&mut self, steps: u32) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        let result = self.slider.move_reverse(steps, self.cancel).await;
        self.report_slider();
        result.map_err(|e| self.motion_error(e))
    }

    /// Return the slider to position 0
    pub async fn go_home(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        let result = self.slider.go_home(self.cancel).await;
        self.report_slider();
        result.map_err(|e| self.motion_error(e))
    }

    /// Declare the current slider location as home
    pub fn set_home(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        self.slider.set_home();
        self.report_slider();
        Ok(())
    }

    /// Switch all slider coils off
    pub fn disable_slider(&mut self) -> Result<(), RoutineError> {
        self.slider.disable().map_err(|e| self.motion_error(e))
    }

    /// Drive the turntable one rotation step
    pub async fn rotate(&mut self, direction: Direction) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        self.turntable
            .drive(direction, self.cancel)
            .await
            .map_err(|e| self.motion_error(e))?;
        self.notify(Progress::Rotated { direction });
        Ok(())
    }

    /// Drive both turntable pins low
    pub fn stop_turntable(&mut self) -> Result<(), RoutineError> {
        self.turntable.stop().map_err(|e| self.motion_error(e))
    }

    /// Take a test shot into the test directory
    pub async fn capture_test_shot(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        let dir = self.settings.test_directory().clone();
        let number = self.shots.counters().test_shot_number();

        match self.shots.capture_test_shot(&dir).await {
            Ok(path) => {
                info!("test shot {}", path.as_str());
                let next = self.shots.counters().test_shot_number();
                self.notify(Progress::TestShotCaptured { number, next });
                Ok(())
            }
            Err(CaptureError::Camera(e)) => Err(RoutineError::Camera(e)),
            Err(e) => Err(self.capture_error(e)),
        }
    }

    pub fn reset_shot_number(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        self.shots.reset_shot_number();
        Ok(())
    }

    pub fn reset_test_shot_number(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        self.shots.reset_test_shot_number();
        Ok(())
    }

    pub fn reset_stack_number(&mut self) -> Result<(), RoutineError> {
        self.ensure_not_busy()?;
        self.shots.reset_stack_number();
        Ok(())
    }

    /// Clear an aborted routine so the next one may start
    ///
    /// Returns `false` if there was nothing to acknowledge.
    pub fn acknowledge_fault(&mut self) -> bool {
        if !self.state.is_aborted() {
            return false;
        }
        info!("fault acknowledged");
        self.apply(RoutineEvent::Acknowledge);
        true
    }

    // Routine plumbing

    pub(crate) fn notify(&mut self, progress: Progress) {
        self.observer.notify(progress);
    }

    pub(crate) fn report_slider(&mut self) {
        let position = self.slider.position().steps();
        self.notify(Progress::SliderMoved { position });
    }

    pub(crate) fn apply(&mut self, event: RoutineEvent) {
        let next = self.state.transition(event);
        if next != self.state {
            debug!("state {} -> {}", self.state, next);
            self.state = next;
            self.notify(Progress::StateChanged(next));
        }
    }

    pub(crate) fn check_cancel(&self) -> Result<(), RoutineError> {
        if self.cancel.is_cancelled() {
            let counters = self.shots.counters();
            Err(RoutineError::Cancelled {
                stack: counters.stack_number(),
                shot: counters.shot_number(),
            })
        } else {
            Ok(())
        }
    }

    /// Claim the rig for a routine
    pub(crate) fn begin_routine(&mut self) -> Result<(), RoutineError> {
        if self.state != RoutineState::Idle {
            return Err(RoutineError::Busy(self.state));
        }
        self.cancel.reset();
        self.sync_drivers();
        self.settings.lock();
        Ok(())
    }

    /// Release the rig after a routine, aborting on failure
    pub(crate) fn end_routine<T>(
        &mut self,
        result: Result<T, RoutineError>,
    ) -> Result<T, RoutineError> {
        if let Err(e) = &result {
            error!("routine failed: {}", e);
            self.release_outputs();
            if let Some(kind) = e.fault_kind() {
                let event = match kind {
                    FaultKind::Cancelled if self.state.is_busy() => RoutineEvent::Cancel,
                    kind => RoutineEvent::Fault(kind),
                };
                self.apply(event);
            }
            let counters = self.shots.counters();
            warn!(
                "halted at slider {} stack {} shot {}",
                self.slider.position().steps(),
                counters.stack_number(),
                counters.shot_number()
            );
        }
        self.settings.unlock();
        result
    }

    fn release_outputs(&mut self) {
        if let Err(e) = self.slider.disable() {
            warn!("could not release slider: {}", e);
        }
        if let Err(e) = self.turntable.stop() {
            warn!("could not stop turntable: {}", e);
        }
    }
}
