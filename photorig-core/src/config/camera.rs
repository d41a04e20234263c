//! Camera pass-through settings
//!
//! The engine does not interpret these values. They are stored, validated
//! for range, exported, and forwarded to the camera unchanged.

use photorig_hal::{CameraParameter, Label};

use super::SettingField;

/// Camera settings
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// 0..=100
    pub brightness: u8,
    /// -100..=100
    pub contrast: i8,
    pub awb_mode: Label,
    pub awb_gains: f32,
    pub iso: u16,
    pub framerate: Label,
    pub shutter_speed: Label,
}

/// Build a label, truncating at capacity
pub fn label(s: &str) -> Label {
    let mut out = Label::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            brightness: 50,
            contrast: 0,
            awb_mode: label("auto"),
            awb_gains: 1.1,
            iso: 200,
            framerate: label("30fps"),
            shutter_speed: label("auto"),
        }
    }
}

impl CameraSettings {
    /// All settings as camera parameters, in a stable order
    pub fn parameters(&self) -> [CameraParameter; 7] {
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

    /// Check a parameter without applying it
    pub fn validate(parameter: &CameraParameter) -> Result<(), SettingField> {
        match parameter {
            CameraParameter::Brightness(b) if *b > 100 => Err(SettingField::Brightness),
            CameraParameter::Contrast(c) if !(-100..=100).contains(c) => {
                Err(SettingField::Contrast)
            }
            CameraParameter::AwbMode(m) if m.is_empty() => Err(SettingField::AwbMode),
            CameraParameter::AwbGains(g) if !g.is_finite() || *g < 0.0 => {
                Err(SettingField::AwbGains)
            }
            CameraParameter::Iso(0) => Err(SettingField::Iso),
            CameraParameter::Framerate(r) if r.is_empty() => Err(SettingField::Framerate),
            CameraParameter::ShutterSpeed(s) if s.is_empty() => Err(SettingField::ShutterSpeed),
            _ => Ok(()),
        }
    }

    /// Validate and store a parameter
    pub fn apply(&mut self, parameter: &CameraParameter) -> Result<(), SettingField> {
        Self::validate(parameter)?;
        match parameter {
            CameraParameter::Brightness(b) => self.brightness = *b,
            CameraParameter::Contrast(c) => self.contrast = *c,
            CameraParameter::AwbMode(m) => self.awb_mode = m.clone(),
            CameraParameter::AwbGains(g) => self.awb_gains = *g,
            CameraParameter::Iso(i) => self.iso = *i,
            CameraParameter::Framerate(r) => self.framerate = r.clone(),
            CameraParameter::ShutterSpeed(s) => self.shutter_speed = s.clone(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cam = CameraSettings::default();
        assert_eq!(cam.brightness, 50);
        assert_eq!(cam.contrast, 0);
        assert_eq!(cam.awb_mode, "auto");
        assert_eq!(cam.iso, 200);
        assert_eq!(cam.framerate, "30fps");
    }

    #[test]
    fn test_apply_in_range() {
        let mut cam = CameraSettings::default();
        cam.apply(&CameraParameter::Brightness(80)).unwrap();
        cam.apply(&CameraParameter::Contrast(-20)).unwrap();
        cam.apply(&CameraParameter::AwbMode(label("daylight"))).unwrap();
        assert_eq!(cam.brightness, 80);
        assert_eq!(cam.contrast, -20);
        assert_eq!(cam.awb_mode, "daylight");
    }

    #[test]
    fn test_out_of_range_keeps_value() {
        let mut cam = CameraSettings::default();
        assert_eq!(
            cam.apply(&CameraParameter::Brightness(101)),
            Err(SettingField::Brightness)
        );
        assert_eq!(
            cam.apply(&CameraParameter::Contrast(-101)),
            Err(SettingField::Contrast)
        );
        assert_eq!(cam.apply(&CameraParameter::Iso(0)), Err(SettingField::Iso));
        assert_eq!(cam, CameraSettings::default());
    }

    #[test]
    fn test_parameters_cover_every_setting() {
        let params = CameraSettings::default().parameters();
        let names: std::vec::Vec<_> = params.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            [
                "brightness",
                "contrast",
                "awb_mode",
                "awb_gains",
                "iso",
                "framerate",
                "shutter_speed"
            ]
        );
    }
}
