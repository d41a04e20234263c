//! Shot sequencing
//!
//! The sequencer turns the counters into file names, asks the camera for a
//! still and only then advances the counter. A failed capture leaves the
//! counter pointing at the shot that was not written.

use log::{debug, info, warn};
use photorig_core::config::CameraSettings;
use photorig_core::naming::{self, ImagePath};
use photorig_core::{CaptureError, RoutineCounters};
use photorig_hal::{Camera, CameraError, CameraParameter, ImageFormat, ImageStore};

/// Camera, image store and the shot/stack counters
pub struct ShotSequencer<C, S> {
    camera: C,
    store: S,
    counters: RoutineCounters,
    format: ImageFormat,
}

impl<C: Camera, S: ImageStore> ShotSequencer<C, S> {
    pub fn new(camera: C, store: S, format: ImageFormat) -> Self {
        Self {
            camera,
            store,
            counters: RoutineCounters::new(),
            format,
        }
    }

    pub fn counters(&self) -> RoutineCounters {
        self.counters
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ImageFormat) {
        self.format = format;
    }

    /// Create the directory for the current stack
    ///
    /// Fails with [`CaptureError::DirectoryExists`] if it is already there;
    /// nothing is overwritten.
    pub fn begin_stack(&mut self, project: &str) -> Result<ImagePath, CaptureError> {
        let dir = naming::stack_dir_name(project, self.counters.stack_number())?;
        self.store.create_dir(&dir).map_err(|e| {
            warn!("cannot create {}: {}", dir.as_str(), e);
            CaptureError::from(e)
        })?;
        info!("stack {} -> {}", self.counters.stack_number(), dir.as_str());
        Ok(dir)
    }

    /// Capture the next stack shot into `dir`
    pub async fn capture_stack_shot(
        &mut self,
        project: &str,
        dir: &str,
    ) -> Result<ImagePath, CaptureError> {
        let file = naming::stack_shot_file_name(project, self.counters.shot_number(), self.format)?;
        let path = naming::join(dir, &file)?;

        self.capture(&path).await?;
        self.counters.advance_shot();
        Ok(path)
    }

    /// Capture the next test shot into `test_dir`
    ///
    /// Only the test-shot counter moves; stack numbering is untouched.
    pub async fn capture_test_shot(&mut self, test_dir: &str) -> Result<ImagePath, CaptureError> {
        self.store.ensure_dir(test_dir)?;
        let file = naming::test_shot_file_name(self.counters.test_shot_number(), self.format)?;
        let path = naming::join(test_dir, &file)?;

        self.capture(&path).await?;
        self.counters.advance_test_shot();
        Ok(path)
    }

    async fn capture(&mut self, path: &str) -> Result<(), CaptureError> {
        debug!("capture {}", path);
        self.camera.capture(path, self.format).await.map_err(|e| {
            warn!("capture of {} failed: {}", path, e);
            CaptureError::Camera(e)
        })
    }

    /// Close the current stack: next stack number, shots from 1
    pub fn finish_stack(&mut self) {
        self.counters.finish_stack();
    }

    pub fn reset_shot_number(&mut self) {
        self.counters.reset_shot_number();
    }

    pub fn reset_test_shot_number(&mut self) {
        self.counters.reset_test_shot_number();
    }

    pub fn reset_stack_number(&mut self) {
        self.counters.reset_stack_number();
    }

    /// Forward one camera parameter
    pub fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError> {
        self.camera.set_parameter(parameter)
    }

    /// Forward every camera setting
    pub fn apply_camera_settings(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        for parameter in settings.parameters() {
            self.camera.set_parameter(&parameter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use photorig_hal::mock::{MockCamera, MockStore, Op, OpLog};

    fn sequencer(log: &OpLog) -> ShotSequencer<MockCamera, MockStore> {
        ShotSequencer::new(MockCamera::new(log), MockStore::new(log), ImageFormat::Jpeg)
    }

    #[test]
    fn test_stack_shot_names() {
        let log = OpLog::new();
        let mut seq = sequencer(&log);

        let dir = seq.begin_stack("shot").unwrap();
        for _ in 0..12 {
            block_on(seq.capture_stack_shot("shot", &dir)).unwrap();
        }

        let captures = log.captures();
        assert_eq!(captures[0], "shot_1/shot01.jpg");
        assert_eq!(captures[6], "shot_1/shot07.jpg");
        assert_eq!(captures[11], "shot_1/shot12.jpg");
        assert_eq!(seq.counters().shot_number(), 13);
    }

    #[test]
    fn test_failed_capture_keeps_counter() {
        let log = OpLog::new();
        let mut seq = ShotSequencer::new(
            MockCamera::new(&log).fail_on_attempt(2),
            MockStore::new(&log),
            ImageFormat::Jpeg,
        );

        block_on(seq.capture_stack_shot("shot", "shot_1")).unwrap();
        let err = block_on(seq.capture_stack_shot("shot", "shot_1")).unwrap_err();

        assert_eq!(err, CaptureError::Camera(CameraError::CaptureFailed));
        assert_eq!(seq.counters().shot_number(), 2);
        assert_eq!(log.captures(), vec!["shot_1/shot01.jpg"]);
    }

    #[test]
    fn test_begin_stack_collision() {
        let log = OpLog::new();
        let mut seq = ShotSequencer::new(
            MockCamera::new(&log),
            MockStore::new(&log).with_existing("shot_1"),
            ImageFormat::Jpeg,
        );

        assert_eq!(seq.begin_stack("shot"), Err(CaptureError::DirectoryExists));
        assert!(log.is_empty());
    }

    #[test]
    fn test_finish_stack_moves_to_next_directory() {
        let log = OpLog::new();
        let mut seq = sequencer(&log);

        let dir = seq.begin_stack("shot").unwrap();
        block_on(seq.capture_stack_shot("shot", &dir)).unwrap();
        seq.finish_stack();
        let dir = seq.begin_stack("shot").unwrap();
        block_on(seq.capture_stack_shot("shot", &dir)).unwrap();

        assert_eq!(log.created_dirs(), vec!["shot_1", "shot_2"]);
        assert_eq!(log.captures(), vec!["shot_1/shot01.jpg", "shot_2/shot01.jpg"]);
    }

    #[test]
    fn test_test_shots_leave_stack_counters() {
        let log = OpLog::new();
        let mut seq = sequencer(&log);

        block_on(seq.capture_test_shot("testShots")).unwrap();
        block_on(seq.capture_test_shot("testShots")).unwrap();

        let counters = seq.counters();
        assert_eq!(counters.test_shot_number(), 3);
        assert_eq!(counters.shot_number(), 1);
        assert_eq!(counters.stack_number(), 1);
        assert_eq!(
            log.captures(),
            vec!["testShots/testShot_1.jpg", "testShots/testShot_2.jpg"]
        );
        // Directory is created once, then reused
        assert_eq!(log.created_dirs(), vec!["testShots"]);
    }

    #[test]
    fn test_camera_settings_forwarded() {
        let log = OpLog::new();
        let mut seq = sequencer(&log);

        seq.apply_camera_settings(&CameraSettings::default()).unwrap();

        assert_eq!(log.len(), 7);
        assert_eq!(log.ops()[0], Op::Parameter { name: "brightness" });
    }
}
