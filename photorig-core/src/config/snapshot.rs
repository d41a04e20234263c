//! Exported settings record
//!
//! A flat record with human-readable keys. With the `serde` feature it
//! serializes to the same JSON layout the rig's settings files use:
//!
//! ```json
//! { "Brightness": 50, "Contrast": 0, "AWB Mode": "auto", "AWB Gains": 1.1,
//!   "ISO": 200, "Framerate": "30fps", "Shutter Speed": "auto",
//!   "Project Name": "shot", "Camera Movement": 10, "Dolly Movement": 5,
//!   "Arc Length": 360, "Number of Shots in Stack": 20,
//!   "Number of Stacks": 72, "Direction": "Clockwise" }
//! ```

use photorig_hal::{CameraParameter, Label};

use super::settings::ProjectName;
use crate::motion::Direction;

/// Settings as exported and imported
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettingsSnapshot {
    #[cfg_attr(feature = "serde", serde(rename = "Brightness"))]
    pub brightness: u8,
    #[cfg_attr(feature = "serde", serde(rename = "Contrast"))]
    pub contrast: i8,
    #[cfg_attr(feature = "serde", serde(rename = "AWB Mode"))]
    pub awb_mode: Label,
    #[cfg_attr(feature = "serde", serde(rename = "AWB Gains"))]
    pub awb_gains: f32,
    #[cfg_attr(feature = "serde", serde(rename = "ISO"))]
    pub iso: u16,
    #[cfg_attr(feature = "serde", serde(rename = "Framerate"))]
    pub framerate: Label,
    #[cfg_attr(feature = "serde", serde(rename = "Shutter Speed"))]
    pub shutter_speed: Label,
    #[cfg_attr(feature = "serde", serde(rename = "Project Name"))]
    pub project_name: ProjectName,
    #[cfg_attr(feature = "serde", serde(rename = "Camera Movement"))]
    pub camera_movement: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Dolly Movement"))]
    pub dolly_movement: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Arc Length"))]
    pub arc_length: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Number of Shots in Stack"))]
    pub number_shots: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Number of Stacks"))]
    pub number_stacks: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Direction"))]
    pub direction: Direction,
}

impl SettingsSnapshot {
    /// Camera part of the record
    pub fn camera_parameters(&self) -> [CameraParameter; 7] {
        [
            CameraParameter::Brightness(self.brightness),
            CameraParameter::Contrast(self.contrast),
            CameraParameter::AwbMode(self.awb_mode.clone()),
            CameraParameter::AwbGains(self.awb_gains),
            CameraParameter::Iso(self.iso),
            CameraParameter::Framerate(self.framerate.clone()),
            CameraParameter::ShutterSpeed(self.shutter_speed.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{label, RoutineSettings};

    #[test]
    fn test_snapshot_round_trip_through_settings() {
        let mut source = RoutineSettings::default();
        source.set_project_name("moth").unwrap();
        source.set_dolly_movement(10).unwrap();
        source.set_direction(Direction::CounterClockwise).unwrap();
        source
            .set_camera_parameter(&CameraParameter::AwbMode(label("cloudy")))
            .unwrap();

        let mut target = RoutineSettings::default();
        target.apply_snapshot(&source.snapshot()).unwrap();

        assert_eq!(target.snapshot(), source.snapshot());
        assert_eq!(target.number_stacks(), 36);
        assert_eq!(target.camera().awb_mode, "cloudy");
    }
}
