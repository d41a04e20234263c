//! Rig configuration
//!
//! `rig.toml` describes the wiring and the start-up routine settings. The
//! copy shipped with the binary is embedded at build time; `--config`
//! points at a replacement.

pub mod loader;

use core::time::Duration;
use std::path::PathBuf;

use photorig_core::config::RoutineSettings;
use photorig_core::{Direction, SettingsError};
use photorig_hal::ImageFormat;
use serde::Deserialize;

pub use loader::{load_config, parse_config, ConfigError};

/// Top level of `rig.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigConfig {
    pub pins: PinConfig,
    pub timing: TimingConfig,
    #[serde(default)]
    pub routine: RoutineConfig,
    pub camera: CameraConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// BCM GPIO numbers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinConfig {
    /// Slider driver inputs in1..in4, in phase order
    pub slider: [u32; 4],
    pub turntable_cw: u32,
    pub turntable_ccw: u32,
}

impl PinConfig {
    /// All six outputs
    pub fn all(&self) -> [u32; 6] {
        let [a, b, c, d] = self.slider;
        [a, b, c, d, self.turntable_cw, self.turntable_ccw]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    pub sleep_time_ms: u64,
    pub shot_pause_ms: u64,
}

/// Routine settings applied at start-up
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutineConfig {
    pub project_name: String,
    pub test_directory: String,
    pub camera_movement: u32,
    pub dolly_movement: u32,
    pub arc_length: u32,
    pub number_shots: u32,
    pub direction: Direction,
    pub image_format: FormatName,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        let defaults = RoutineSettings::default();
        let motion = defaults.motion();
        Self {
            project_name: defaults.project_name().as_str().into(),
            test_directory: defaults.test_directory().as_str().into(),
            camera_movement: motion.camera_movement,
            dolly_movement: motion.dolly_movement,
            arc_length: motion.arc_length,
            number_shots: defaults.number_shots(),
            direction: defaults.direction(),
            image_format: FormatName::Jpeg,
        }
    }
}

/// Image format as written in `rig.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    Jpeg,
    Png,
}

impl From<FormatName> for ImageFormat {
    fn from(name: FormatName) -> Self {
        match name {
            FormatName::Jpeg => ImageFormat::Jpeg,
            FormatName::Png => ImageFormat::Png,
        }
    }
}

/// Still capture command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    pub program: String,
    pub width: u32,
    pub height: u32,
    /// Passed to the program as its preview timeout
    pub timeout_ms: u64,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Root of stack and test-shot directories
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl RigConfig {
    /// Routine settings described by this configuration
    pub fn to_settings(&self) -> Result<RoutineSettings, SettingsError> {
        let routine = &self.routine;
        let mut settings = RoutineSettings::default();
        settings.set_sleep_time(Duration::from_millis(self.timing.sleep_time_ms))?;
        settings.set_shot_pause(Duration::from_millis(self.timing.shot_pause_ms))?;
        settings.set_project_name(&routine.project_name)?;
        settings.set_test_directory(&routine.test_directory)?;
        settings.set_camera_movement(routine.camera_movement)?;
        settings.set_dolly_movement(routine.dolly_movement)?;
        settings.set_arc_length(routine.arc_length)?;
        settings.set_number_shots(routine.number_shots)?;
        settings.set_direction(routine.direction)?;
        settings.set_image_format(routine.image_format.into())?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBEDDED: &str = include_str!("../../rig.toml");

    #[test]
    fn test_embedded_config_parses() {
        let config = parse_config(EMBEDDED).unwrap();
        assert_eq!(config.pins.slider, [17, 27, 22, 23]);
        assert_eq!(config.pins.turntable_cw, 26);
        assert_eq!(config.pins.turntable_ccw, 19);
        assert_eq!(config.camera.program, "rpicam-still");
    }

    #[test]
    fn test_embedded_settings_match_defaults() {
        let config = parse_config(EMBEDDED).unwrap();
        let settings = config.to_settings().unwrap();
        assert_eq!(settings.motion(), RoutineSettings::default().motion());
        assert_eq!(settings.number_stacks(), 72);
        assert_eq!(settings.project_name().as_str(), "shot");
        assert_eq!(settings.image_format(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_routine_section_optional() {
        let text = r#"
            [pins]
            slider = [5, 6, 13, 16]
            turntable_cw = 20
            turntable_ccw = 21

            [timing]
            sleep_time_ms = 3
            shot_pause_ms = 500

            [camera]
            program = "rpicam-still"
            width = 2028
            height = 1520
            timeout_ms = 500
        "#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.routine, RoutineConfig::default());
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert!(config.camera.extra_args.is_empty());

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.motion().sleep_time, Duration::from_millis(3));
        assert_eq!(settings.motion().shot_pause, Duration::from_millis(500));
    }

    #[test]
    fn test_counter_clockwise_direction() {
        let text = EMBEDDED.replace(
            "direction = \"Clockwise\"",
            "direction = \"Counter-Clockwise\"",
        );
        let config = parse_config(&text).unwrap();
        assert_eq!(config.routine.direction, Direction::CounterClockwise);
    }

    #[test]
    fn test_zero_dolly_movement_rejected() {
        let text = EMBEDDED.replace("dolly_movement = 5", "dolly_movement = 0");
        let config = parse_config(&text).unwrap();
        assert!(matches!(
            config.to_settings(),
            Err(SettingsError::InvalidSetting(_))
        ));
    }
}
