//! Digital outputs through the sysfs GPIO interface

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use log::debug;
use thiserror::Error;

/// Default sysfs mount point
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("cannot export GPIO {pin}: {source}")]
    Export {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("cannot drive GPIO {pin}: {source}")]
    Write {
        pin: u32,
        #[source]
        source: io::Error,
    },
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One exported output pin
#[derive(Debug)]
pub struct SysfsPin {
    pin: u32,
    value: File,
}

impl SysfsPin {
    /// Export `pin` below `root`, configure it as output and drive it low
    pub fn export(root: &Path, pin: u32) -> Result<Self, GpioError> {
        let export_err = |source| GpioError::Export { pin, source };
        let dir = pin_dir(root, pin);

        if !dir.exists() {
            fs::write(root.join("export"), pin.to_string()).map_err(export_err)?;
        }
        fs::write(dir.join("direction"), "low").map_err(export_err)?;
        let value = OpenOptions::new()
            .write(true)
            .open(dir.join("value"))
            .map_err(export_err)?;
        debug!("GPIO {} exported as output", pin);

        let mut out = Self { pin, value };
        out.write(false)?;
        Ok(out)
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        let level: &[u8] = if high { b"1" } else { b"0" };
        self.value
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.value.write_all(level))
            .map_err(|source| GpioError::Write {
                pin: self.pin,
                source,
            })
    }
}

fn pin_dir(root: &Path, pin: u32) -> PathBuf {
    root.join(format!("gpio{}", pin))
}

impl ErrorType for SysfsPin {
    type Error = GpioError;
}

impl OutputPin for SysfsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_pin(root: &Path, pin: u32) -> PathBuf {
        let dir = pin_dir(root, pin);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("direction"), "in").unwrap();
        fs::write(dir.join("value"), "1").unwrap();
        dir
    }

    #[test]
    fn test_export_configures_output_low() {
        let root = tempfile::tempdir().unwrap();
        let dir = fake_pin(root.path(), 17);

        let pin = SysfsPin::export(root.path(), 17).unwrap();
        assert_eq!(pin.pin(), 17);
        assert_eq!(fs::read_to_string(dir.join("direction")).unwrap(), "low");
        assert_eq!(fs::read_to_string(dir.join("value")).unwrap(), "0");
        assert!(!root.path().join("export").exists());
    }

    #[test]
    fn test_levels_written() {
        let root = tempfile::tempdir().unwrap();
        let dir = fake_pin(root.path(), 26);
        let mut pin = SysfsPin::export(root.path(), 26).unwrap();

        pin.set_high().unwrap();
        assert_eq!(fs::read_to_string(dir.join("value")).unwrap(), "1");
        pin.set_low().unwrap();
        assert_eq!(fs::read_to_string(dir.join("value")).unwrap(), "0");
    }

    #[test]
    fn test_unexported_pin_requests_export() {
        let root = tempfile::tempdir().unwrap();
        // Nothing creates gpio5, so the export request is written and then fails
        let err = SysfsPin::export(root.path(), 5).unwrap_err();
        assert!(matches!(err, GpioError::Export { pin: 5, .. }));
        assert_eq!(
            fs::read_to_string(root.path().join("export")).unwrap(),
            "5"
        );
    }
}
