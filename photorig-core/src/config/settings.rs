//! Routine settings and the settings lock
//!
//! `number_stacks` is a cached value. It is recomputed from
//! `arc_length / dolly_movement` only by [`RoutineSettings::set_arc_length`],
//! [`RoutineSettings::set_dolly_movement`] and
//! [`RoutineSettings::recompute_number_stacks`]; importing a snapshot keeps
//! the stored count as is.

use core::time::Duration;

use photorig_hal::{CameraParameter, ImageFormat};

use super::camera::CameraSettings;
use super::snapshot::SettingsSnapshot;
use super::{is_valid_component, SettingField};
use crate::error::SettingsError;
use crate::motion::Direction;

/// Longest accepted project or test directory name
pub const MAX_PROJECT_NAME_LEN: usize = 32;

/// Project name, used as image file prefix and stack directory prefix
pub type ProjectName = heapless::String<MAX_PROJECT_NAME_LEN>;

/// Directory name relative to the image store root
pub type DirName = heapless::String<MAX_PROJECT_NAME_LEN>;

/// Motion timing and distances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSettings {
    /// Slider micro-moves between two shots
    pub camera_movement: u32,
    /// Turntable drive units per rotation step (drive time is half this, in seconds)
    pub dolly_movement: u32,
    /// Degrees covered by the whole session
    pub arc_length: u32,
    /// Hold time of each coil phase
    pub sleep_time: Duration,
    /// Settle time around each capture
    pub shot_pause: Duration,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            camera_movement: 10,
            dolly_movement: 5,
            arc_length: 360,
            sleep_time: Duration::from_millis(2),
            shot_pause: Duration::from_secs(2),
        }
    }
}

impl MotionSettings {
    /// How long the turntable pin stays asserted for one rotation step
    pub fn turntable_drive_time(&self) -> Duration {
        Duration::from_millis(u64::from(self.dolly_movement) * 500)
    }

    /// Stacks that fit into the arc, truncating
    pub fn stacks_in_arc(&self) -> u32 {
        self.arc_length.checked_div(self.dolly_movement).unwrap_or(0)
    }
}

/// Full routine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineSettings {
    motion: MotionSettings,
    camera: CameraSettings,
    project_name: ProjectName,
    test_directory: DirName,
    image_format: ImageFormat,
    number_shots: u32,
    number_stacks: u32,
    direction: Direction,
    locked: bool,
}

impl Default for RoutineSettings {
    fn default() -> Self {
        let motion = MotionSettings::default();
        Self {
            number_stacks: motion.stacks_in_arc(),
            motion,
            camera: CameraSettings::default(),
            project_name: default_name("shot"),
            test_directory: default_name("testShots"),
            image_format: ImageFormat::Jpeg,
            number_shots: 20,
            direction: Direction::Clockwise,
            locked: false,
        }
    }
}

fn default_name(s: &str) -> ProjectName {
    let mut out = ProjectName::new();
    let _ = out.push_str(s);
    out
}

fn component(s: &str, field: SettingField) -> Result<ProjectName, SettingsError> {
    if !is_valid_component(s) {
        return Err(SettingsError::InvalidSetting(field));
    }
    let mut out = ProjectName::new();
    out.push_str(s)
        .map_err(|_| SettingsError::InvalidSetting(field))?;
    Ok(out)
}

fn non_zero(value: u32, field: SettingField) -> Result<u32, SettingsError> {
    if value == 0 {
        Err(SettingsError::InvalidSetting(field))
    } else {
        Ok(value)
    }
}

fn non_zero_duration(value: Duration, field: SettingField) -> Result<Duration, SettingsError> {
    if value.is_zero() {
        Err(SettingsError::InvalidSetting(field))
    } else {
        Ok(value)
    }
}

impl RoutineSettings {
    pub fn motion(&self) -> &MotionSettings {
        &self.motion
    }

    pub fn camera(&self) -> &CameraSettings {
        &self.camera
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn test_directory(&self) -> &DirName {
        &self.test_directory
    }

    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    pub fn number_shots(&self) -> u32 {
        self.number_shots
    }

    /// Cached stack count used by the full routine
    pub fn number_stacks(&self) -> u32 {
        self.number_stacks
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if a routine currently holds the settings
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Reject every change until [`unlock`](Self::unlock)
    ///
    /// Held by the engine for the whole duration of a routine.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Allow changes again
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    fn check_unlocked(&self) -> Result<(), SettingsError> {
        if self.locked {
            Err(SettingsError::Locked)
        } else {
            Ok(())
        }
    }

    pub fn set_camera_movement(&mut self, steps: u32) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.motion.camera_movement = non_zero(steps, SettingField::CameraMovement)?;
        Ok(())
    }

    /// Set the turntable step and recompute the stack count
    pub fn set_dolly_movement(&mut self, units: u32) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.motion.dolly_movement = non_zero(units, SettingField::DollyMovement)?;
        self.number_stacks = self.motion.stacks_in_arc();
        Ok(())
    }

    /// Set the session arc and recompute the stack count
    pub fn set_arc_length(&mut self, degrees: u32) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.motion.arc_length = degrees;
        self.number_stacks = self.motion.stacks_in_arc();
        Ok(())
    }

    pub fn set_sleep_time(&mut self, phase_delay: Duration) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.motion.sleep_time = non_zero_duration(phase_delay, SettingField::SleepTime)?;
        Ok(())
    }

    pub fn set_shot_pause(&mut self, pause: Duration) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.motion.shot_pause = non_zero_duration(pause, SettingField::ShotPause)?;
        Ok(())
    }

    pub fn set_number_shots(&mut self, shots: u32) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.number_shots = non_zero(shots, SettingField::NumberShots)?;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.direction = direction;
        Ok(())
    }

    pub fn set_project_name(&mut self, name: &str) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.project_name = component(name, SettingField::ProjectName)?;
        Ok(())
    }

    pub fn set_test_directory(&mut self, dir: &str) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.test_directory = component(dir, SettingField::TestDirectory)?;
        Ok(())
    }

    pub fn set_image_format(&mut self, format: ImageFormat) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.image_format = format;
        Ok(())
    }

    /// Store a camera parameter after range checking
    pub fn set_camera_parameter(
        &mut self,
        parameter: &CameraParameter,
    ) -> Result<(), SettingsError> {
        self.check_unlocked()?;
        self.camera
            .apply(parameter)
            .map_err(SettingsError::InvalidSetting)
    }

    /// Recompute the cached stack count from the current arc and step
    pub fn recompute_number_stacks(&mut self) -> Result<u32, SettingsError> {
        self.check_unlocked()?;
        self.number_stacks = self.motion.stacks_in_arc();
        Ok(self.number_stacks)
    }

    /// Capture the exportable part of the settings
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            brightness: self.camera.brightness,
            contrast: self.camera.contrast,
            awb_mode: self.camera.awb_mode.clone(),
            awb_gains: self.camera.awb_gains,
            iso: self.camera.iso,
            framerate: self.camera.framerate.clone(),
            shutter_speed: self.camera.shutter_speed.clone(),
            project_name: self.project_name.clone(),
            camera_movement: self.motion.camera_movement,
            dolly_movement: self.motion.dolly_movement,
            arc_length: self.motion.arc_length,
            number_shots: self.number_shots,
            number_stacks: self.number_stacks,
            direction: self.direction,
        }
    }

    /// Replace the exportable settings with a snapshot
    ///
    /// All values are validated first; on error nothing changes. The stack
    /// count is taken verbatim from the snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &SettingsSnapshot) -> Result<(), SettingsError> {
        self.check_unlocked()?;

        let mut next = self.clone();
        for parameter in snapshot.camera_parameters() {
            next.set_camera_parameter(&parameter)?;
        }
        next.set_project_name(&snapshot.project_name)?;
        next.set_camera_movement(snapshot.camera_movement)?;
        next.set_dolly_movement(snapshot.dolly_movement)?;
        next.set_arc_length(snapshot.arc_length)?;
        next.set_number_shots(snapshot.number_shots)?;
        next.set_direction(snapshot.direction)?;
        next.number_stacks = snapshot.number_stacks;

        *self = next;
        Ok(())
    }
}
