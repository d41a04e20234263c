//! Routine configuration
//!
//! Settings are plain values owned by the engine. They can only change
//! between routines; see [`RoutineSettings::lock`].

pub mod camera;
pub mod settings;
pub mod snapshot;

use core::fmt;

pub use camera::{label, CameraSettings};
pub use settings::{
    DirName, MotionSettings, ProjectName, RoutineSettings, MAX_PROJECT_NAME_LEN,
};
pub use snapshot::SettingsSnapshot;

/// Setting named in an [`InvalidSetting`](crate::SettingsError::InvalidSetting) error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    CameraMovement,
    DollyMovement,
    ArcLength,
    NumberShots,
    SleepTime,
    ShotPause,
    ProjectName,
    TestDirectory,
    Brightness,
    Contrast,
    AwbMode,
    AwbGains,
    Iso,
    Framerate,
    ShutterSpeed,
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SettingField::CameraMovement => "camera movement",
            SettingField::DollyMovement => "dolly movement",
            SettingField::ArcLength => "arc length",
            SettingField::NumberShots => "number of shots",
            SettingField::SleepTime => "sleep time",
            SettingField::ShotPause => "shot pause",
            SettingField::ProjectName => "project name",
            SettingField::TestDirectory => "test directory",
            SettingField::Brightness => "brightness",
            SettingField::Contrast => "contrast",
            SettingField::AwbMode => "awb mode",
            SettingField::AwbGains => "awb gains",
            SettingField::Iso => "iso",
            SettingField::Framerate => "framerate",
            SettingField::ShutterSpeed => "shutter speed",
        };
        f.write_str(s)
    }
}

/// Check that a name is usable as a single path component
pub(crate) fn is_valid_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_components() {
        assert!(is_valid_component("shot"));
        assert!(is_valid_component("beetle wing"));
        assert!(!is_valid_component(""));
        assert!(!is_valid_component(".."));
        assert!(!is_valid_component("a/b"));
        assert!(!is_valid_component("a\\b"));
    }
}
