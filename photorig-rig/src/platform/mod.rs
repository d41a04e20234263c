//! Raspberry Pi platform
//!
//! Binds the engine's capabilities to sysfs GPIO, `rpicam-still` and the
//! local filesystem, or to logging stand-ins with `--dry-run`.

pub mod camera;
pub mod clock;
pub mod gpio;
pub mod sim;
pub mod store;

use std::path::Path;
use std::sync::atomic::Ordering;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;
use photorig_core::{Progress, RoutineObserver};
use photorig_engine::{RigParts, RigPlatform};
use photorig_hal::{Camera, CameraError, CameraParameter, ImageFormat};

use crate::channels::{PROGRESS, RIG_BUSY};
use crate::config::RigConfig;
use camera::RpicamStill;
use clock::RigClock;
use gpio::{GpioError, SysfsPin};
use sim::{SimCamera, SimPin};
use store::FsStore;

/// Output pin on real or simulated hardware
#[derive(Debug)]
pub enum RigPin {
    Sysfs(SysfsPin),
    Sim(SimPin),
}

impl ErrorType for RigPin {
    type Error = GpioError;
}

impl OutputPin for RigPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        match self {
            RigPin::Sysfs(pin) => pin.set_low(),
            RigPin::Sim(pin) => pin.set_low().map_err(|never| match never {}),
        }
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self {
            RigPin::Sysfs(pin) => pin.set_high(),
            RigPin::Sim(pin) => pin.set_high().map_err(|never| match never {}),
        }
    }
}

#[derive(Debug)]
pub enum RigCamera {
    Rpicam(RpicamStill),
    Sim(SimCamera),
}

impl Camera for RigCamera {
    async fn capture(&mut self, path: &str, format: ImageFormat) -> Result<(), CameraError> {
        match self {
            RigCamera::Rpicam(camera) => camera.capture(path, format).await,
            RigCamera::Sim(camera) => camera.capture(path, format).await,
        }
    }

    fn set_parameter(&mut self, parameter: &CameraParameter) -> Result<(), CameraError> {
        match self {
            RigCamera::Rpicam(camera) => camera.set_parameter(parameter),
            RigCamera::Sim(camera) => camera.set_parameter(parameter),
        }
    }
}

/// Forwards progress to the progress task and mirrors the busy state
#[derive(Debug, Default)]
pub struct ChannelObserver;

impl RoutineObserver for ChannelObserver {
    fn notify(&mut self, progress: Progress) {
        if let Progress::StateChanged(state) = progress {
            RIG_BUSY.store(state.is_busy(), Ordering::Release);
        }
        if PROGRESS.try_send(progress).is_err() {
            warn!("progress queue full, dropped {:?}", progress);
        }
    }
}

pub struct HostRig;

impl RigPlatform for HostRig {
    type SliderPin = RigPin;
    type TurntablePin = RigPin;
    type Delay = RigClock;
    type Camera = RigCamera;
    type Store = FsStore;
    type Observer = ChannelObserver;
}

/// Build the rig's capabilities
///
/// With `dry_run` no GPIO is touched and captures produce empty files.
pub fn build_parts(
    config: &RigConfig,
    output: &Path,
    gpio_root: &Path,
    dry_run: bool,
) -> Result<RigParts<HostRig>, GpioError> {
    let pin = |number: u32| -> Result<RigPin, GpioError> {
        if dry_run {
            Ok(RigPin::Sim(SimPin::new(number)))
        } else {
            SysfsPin::export(gpio_root, number).map(RigPin::Sysfs)
        }
    };

    let [in1, in2, in3, in4] = config.pins.slider;
    let slider_coils = [pin(in1)?, pin(in2)?, pin(in3)?, pin(in4)?];
    let turntable_cw = pin(config.pins.turntable_cw)?;
    let turntable_ccw = pin(config.pins.turntable_ccw)?;

    let camera = if dry_run {
        RigCamera::Sim(SimCamera::new(output))
    } else {
        RigCamera::Rpicam(RpicamStill::new(&config.camera, output))
    };

    Ok(RigParts {
        slider_coils,
        turntable_cw,
        turntable_ccw,
        delay: RigClock,
        camera,
        store: FsStore::new(output),
        observer: ChannelObserver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const EMBEDDED: &str = include_str!("../../rig.toml");

    #[test]
    fn test_dry_run_parts() {
        let config = parse_config(EMBEDDED).unwrap();
        let output = tempfile::tempdir().unwrap();
        let parts = build_parts(&config, output.path(), Path::new("/nonexistent"), true).unwrap();
        assert!(parts
            .slider_coils
            .iter()
            .all(|pin| matches!(pin, RigPin::Sim(_))));
        assert!(matches!(parts.camera, RigCamera::Sim(_)));
        assert_eq!(parts.store.root(), output.path());
    }

    #[test]
    fn test_real_parts_need_gpio() {
        let config = parse_config(EMBEDDED).unwrap();
        let output = tempfile::tempdir().unwrap();
        let gpio = tempfile::tempdir().unwrap();
        let err = build_parts(&config, output.path(), gpio.path(), false).err();
        assert!(matches!(err, Some(GpioError::Export { pin: 17, .. })));
    }
}
