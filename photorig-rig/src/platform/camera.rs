//! Still capture through `rpicam-still`
//!
//! Parameters are kept as command-line options and applied on the next
//! capture. UI labels are translated here:
//!
//! | Setting        | Label example | Option                   |
//! |----------------|---------------|--------------------------|
//! | brightness     | 0..100        | `--brightness -1.0..1.0` |
//! | contrast       | -100..100     | `--contrast 0.0..2.0`    |
//! | AWB mode       | `sunlight`    | `--awb daylight`         |
//! | AWB gains      | 1.1           | `--awbgains 1.1,1.1`     |
//! | ISO            | 200           | `--gain 2.0`             |
//! | framerate      | `1/2fps`      | `--framerate 0.5`        |
//! | shutter speed  | `1/125`       | `--shutter 8000`         |

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use embassy_time::{Duration, Instant, Timer};
use log::{debug, info, warn};
use photorig_hal::{Camera, CameraError, CameraParameter, ImageFormat};

use crate::config::CameraConfig;

/// Interval between checks on the capture process
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Time allowed beyond preview timeout and exposure
const CAPTURE_SLACK: Duration = Duration::from_secs(10);

/// Options derived from the camera settings
#[derive(Debug, Clone, PartialEq)]
struct CaptureOptions {
    brightness: f32,
    contrast: f32,
    awb: &'static str,
    awb_gains: f32,
    gain: f32,
    framerate: Option<f32>,
    shutter_us: Option<u32>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            awb: "auto",
            awb_gains: 1.1,
            gain: 2.0,
            framerate: Some(30.0),
            shutter_us: None,
        }
    }
}

/// `rpicam-still` wrapper
#[derive(Debug)]
pub struct RpicamStill {
    root: PathBuf,
    program: String,
    width: u32,
    height: u32,
    timeout: Duration,
    extra_args: Vec<String>,
    options: CaptureOptions,
}

impl RpicamStill {
    /// Camera writing below `root`, the same root as the image store
    pub fn new(config: &CameraConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: config.program.clone(),
            width: config.width,
            height: config.height,
            timeout: Duration::from_millis(config.timeout_ms),
            extra_args: config.extra_args.clone(),
            options: CaptureOptions::default(),
        }
    }

    fn args(&self, path: &str, format: ImageFormat) -> Vec<String> {
        let o = &self.options;
        let mut args = vec![
            "-o".to_string(),
            self.root.join(path).display().to_string(),
            "--encoding".to_string(),
            format.extension().to_string(),
            "--width".to_string(),
            self.width.to_string(),
            "--height".to_string(),
            self.height.to_string(),
            "--timeout".to_string(),
            self.timeout.as_millis().to_string(),
            "--brightness".to_string(),
            format!("{:.2}", o.brightness),
            "--contrast".to_string(),
            format!("{:.2}", o.contrast),
            "--gain".to_string(),
            format!("{:.2}", o.gain),
        ];

        if o.awb == "custom" {
            args.push("--awbgains".to_string());
            args.push(format!("{:.2},{:.2}", o.awb_gains, o.awb_gains));
        } else {
            args.push("--awb".to_string());
            args.push(o.awb.to_string());
        }
        if let Some(fps) = o.framerate {
            args.push("--framerate".to_string());
            args.push(format!("{}", fps));
        }
        if let Some(us) = o.shutter_us {
            args.push("--shutter".to_string());
            args.push(us.to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }

    fn deadline(&self) -> Instant {
        let exposure = self
            .options
            .shutter_us
            .map(|us| Duration::from_micros(u64::from(us)))
            .unwrap_or(Duration::from_ticks(0));
        Instant::now() + self.timeout + exposure + CAPTURE_SLACK
    }

    fn spawn(&self, path: &str, format: ImageFormat) -> Result<Child, CameraError> {
        Command::new(&self.program)
            .args(self.args(path, format))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                warn!("cannot start {}: {}", self.program, e);
                match e.kind() {
                    ErrorKind::NotFound | ErrorKind::PermissionDenied => CameraError::Unavailable,
                    _ => CameraError::CaptureFailed,
                }
            })
    }
}

impl Camera for RpicamStill {
    async fn capture(&mut self, path: &str, format: ImageFormat) -> Result<(), CameraError> {
        let mut child = self.spawn(path, format)?;
        let deadline = self.deadline();

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    warn!("capture of {} timed out", path);
                    terminate(&mut child);
                    return Err(CameraError::Timeout);
                }
                Ok(None) => Timer::after(POLL_INTERVAL).await,
                Err(e) => {
                    warn!("lost capture process: {}", e);
                    return Err(CameraError::CaptureFailed);
                }
            }
        };

        if !status.success() {
            warn!("{} exited with {}", self.program, status);
            return Err(CameraError::CaptureFailed);
        }
        if !self.root.join(path).is_file() {
            return Err(CameraError::Io);
        }
        info!("captured {}", path);
        Ok(())
    }

    fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError> {
        let o = &mut self.options;
        match parameter {
            CameraParameter::Brightness(b) => o.brightness = (f32::from(*b) - 50.0) / 50.0,
            CameraParameter::Contrast(c) => o.contrast = f32::from(*c) / 100.0 + 1.0,
            CameraParameter::AwbMode(mode) => o.awb = awb_mode(mode)?,
            CameraParameter::AwbGains(g) => o.awb_gains = *g,
            CameraParameter::Iso(iso) => o.gain = f32::from(*iso) / 100.0,
            CameraParameter::Framerate(label) => o.framerate = framerate(label)?,
            CameraParameter::ShutterSpeed(label) => o.shutter_us = shutter_micros(label)?,
        }
        debug!("camera {} updated", parameter.name());
        Ok(())
    }
}

/// Kill a hung capture process and reap it
fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("cannot kill capture process {}: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        warn!("cannot reap capture process {}: {}", child.id(), e);
    }
}

/// Map an AWB label onto an rpicam AWB mode; `off` selects manual gains
fn awb_mode(label: &str) -> Result<&'static str, CameraError> {
    Ok(match label {
        "auto" => "auto",
        "sunlight" | "flash" => "daylight",
        "cloudy" | "shade" => "cloudy",
        "tungsten" => "tungsten",
        "fluorescent" => "fluorescent",
        "incandescent" | "horizon" => "incandescent",
        "off" => "custom",
        _ => return Err(CameraError::InvalidParameter),
    })
}

/// Frames per second from labels such as `30fps` or `1/3fps`; `None` for auto
fn framerate(label: &str) -> Result<Option<f32>, CameraError> {
    if label == "auto" {
        return Ok(None);
    }
    let rate = label
        .strip_suffix("fps")
        .ok_or(CameraError::InvalidParameter)?;
    let value = match rate.split_once('/') {
        Some((num, den)) => parse_positive(num)? / parse_positive(den)?,
        None => parse_positive(rate)?,
    };
    Ok(Some(value))
}

/// Exposure in microseconds from labels such as `1/125` or `2 seconds`
fn shutter_micros(label: &str) -> Result<Option<u32>, CameraError> {
    if label == "auto" {
        return Ok(None);
    }
    if let Some(den) = label.strip_prefix("1/") {
        let den: u32 = den.parse().map_err(|_| CameraError::InvalidParameter)?;
        return match 1_000_000u32.checked_div(den) {
            Some(us) => Ok(Some(us)),
            None => Err(CameraError::InvalidParameter),
        };
    }
    let secs = label
        .strip_suffix(" seconds")
        .or_else(|| label.strip_suffix(" second"))
        .ok_or(CameraError::InvalidParameter)?;
    let secs: u32 = secs.parse().map_err(|_| CameraError::InvalidParameter)?;
    secs.checked_mul(1_000_000)
        .filter(|us| *us > 0)
        .map(Some)
        .ok_or(CameraError::InvalidParameter)
}

fn parse_positive(s: &str) -> Result<f32, CameraError> {
    match s.trim().parse::<f32>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(CameraError::InvalidParameter),
    }
}
