//! Camera abstraction
//!
//! The engine only ever asks the camera for two things: take a still into a
//! path, and forward a tuning parameter. Resolution, sensor modes and the
//! translation of UI labels into driver values stay in the implementation.

use core::fmt;
use core::future::Future;

/// Short text value used for labels such as AWB mode or framerate
pub type Label = heapless::String<16>;

/// Output encoding for captured stills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageFormat {
    /// JPEG, stored with a `.jpg` extension
    #[default]
    Jpeg,
    /// PNG, stored with a `.png` extension
    Png,
}

impl ImageFormat {
    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// Camera tuning parameter
///
/// Values are forwarded untouched; the camera implementation decides how a
/// label such as `"1/125"` maps onto its driver.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraParameter {
    /// Brightness, 0-100
    Brightness(u8),
    /// Contrast, -100-100
    Contrast(i8),
    /// Auto white balance mode label (`auto`, `sunlight`, ...)
    AwbMode(Label),
    /// Manual AWB gain
    AwbGains(f32),
    /// Sensor sensitivity
    Iso(u16),
    /// Framerate label (`30fps`, `1/2fps`, `auto`, ...)
    Framerate(Label),
    /// Shutter speed label (`1/125`, `2 seconds`, `auto`, ...)
    ShutterSpeed(Label),
}

impl CameraParameter {
    /// Parameter name as shown in logs and settings files
    pub fn name(&self) -> &'static str {
        match self {
            CameraParameter::Brightness(_) => "brightness",
            CameraParameter::Contrast(_) => "contrast",
            CameraParameter::AwbMode(_) => "awb_mode",
            CameraParameter::AwbGains(_) => "awb_gains",
            CameraParameter::Iso(_) => "iso",
            CameraParameter::Framerate(_) => "framerate",
            CameraParameter::ShutterSpeed(_) => "shutter_speed",
        }
    }
}

/// Errors reported by a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CameraError {
    /// Camera is not connected or could not be opened
    Unavailable,
    /// The capture command ran but reported failure
    CaptureFailed,
    /// The image could not be written
    Io,
    /// Capture did not finish in time
    Timeout,
    /// Parameter value rejected by the driver
    InvalidParameter,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CameraError::Unavailable => "camera unavailable",
            CameraError::CaptureFailed => "capture failed",
            CameraError::Io => "image write failed",
            CameraError::Timeout => "capture timed out",
            CameraError::InvalidParameter => "invalid camera parameter",
        };
        f.write_str(msg)
    }
}

/// Still camera
pub trait Camera {
    /// Capture one still into `path` using `format`
    ///
    /// The future resolves once the image is fully written. The engine never
    /// moves a motor while a capture is outstanding.
    fn capture(
        &mut self,
        path: &str,
        format: ImageFormat,
    ) -> impl Future<Output = Result<(), CameraError>>;

    /// Forward a tuning parameter to the driver
    fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::default(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_parameter_names() {
        assert_eq!(CameraParameter::Iso(200).name(), "iso");
        assert_eq!(CameraParameter::AwbGains(1.1).name(), "awb_gains");
    }
}
