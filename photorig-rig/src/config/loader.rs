//! Configuration loading
//!
//! Reads `rig.toml` from disk, or falls back to the embedded copy.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::RigConfig;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rig configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("GPIO {0} is assigned more than once")]
    DuplicatePin(u32),
}

/// Parse and check a configuration document
pub fn parse_config(text: &str) -> Result<RigConfig, ConfigError> {
    let config: RigConfig = toml::from_str(text)?;

    let pins = config.pins.all();
    for (i, pin) in pins.iter().enumerate() {
        if pins[i + 1..].contains(pin) {
            return Err(ConfigError::DuplicatePin(*pin));
        }
    }

    Ok(config)
}

/// Load `path`, or the embedded configuration when no path is given
pub fn load_config(path: Option<&Path>, embedded: &str) -> Result<RigConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Loading configuration from {}", path.display());
            parse_config(&text)?
        }
        None => {
            info!("Using embedded configuration");
            parse_config(embedded)?
        }
    };

    log_config_summary(&config);
    Ok(config)
}

fn log_config_summary(config: &RigConfig) {
    debug!(
        "slider pins {:?}, turntable cw {} ccw {}",
        config.pins.slider, config.pins.turntable_cw, config.pins.turntable_ccw
    );
    debug!(
        "phase delay {} ms, shot pause {} ms",
        config.timing.sleep_time_ms, config.timing.shot_pause_ms
    );
    debug!(
        "camera {} {}x{}, output {}",
        config.camera.program,
        config.camera.width,
        config.camera.height,
        config.output.directory.display()
    );
}
