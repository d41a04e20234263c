//! Photorig - focus-stacking rig controller
//!
//! Host binary for the Raspberry Pi driving the slider, the turntable and
//! the camera. Commands arrive on stdin; see `help` at the prompt.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::select;
use log::{error, info, warn};

use photorig_engine::RigEngine;

use crate::channels::CANCEL;
use crate::config::load_config;
use crate::platform::gpio::SYSFS_GPIO_ROOT;
use crate::settings_file::import_settings;
use crate::tasks::HostEngine;

/// Embedded default configuration (compiled into the binary)
/// Edit rig.toml and rebuild to change the defaults
const EMBEDDED_CONFIG: &str = include_str!("../rig.toml");

mod channels;
mod command;
mod config;
mod console;
mod platform;
mod settings_file;
mod tasks;

#[derive(Parser, Debug)]
#[command(name = "photorig", version, about = "Focus-stacking rig controller")]
struct Args {
    /// Rig configuration file; the embedded rig.toml when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for stacks, test shots and exported settings
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file to import at start-up (as written by `export`)
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Log pin changes and write empty images instead of driving hardware
    #[arg(long)]
    dry_run: bool,

    /// sysfs GPIO directory
    #[arg(long, default_value = SYSFS_GPIO_ROOT)]
    gpio_root: PathBuf,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Photorig starting...");
    let (engine, output) = match setup(&args) {
        Ok(ready) => ready,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = console::spawn_console() {
        error!("cannot start console: {}", e);
        std::process::exit(1);
    }
    info!("Rig ready, type `help` for commands");

    select(
        tasks::routine_task(engine, output),
        tasks::progress_task(),
    )
    .await;

    info!("Photorig stopped");
    std::process::exit(0);
}

/// Load configuration and settings, then bring up the hardware
fn setup(args: &Args) -> anyhow::Result<(HostEngine, PathBuf)> {
    let config = load_config(args.config.as_deref(), EMBEDDED_CONFIG)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    fs::create_dir_all(&output)
        .with_context(|| format!("cannot create output directory {}", output.display()))?;

    let mut settings = config
        .to_settings()
        .map_err(|e| anyhow!("rig.toml routine settings: {}", e))?;
    if let Some(path) = &args.defaults {
        let snapshot = import_settings(path)?;
        settings
            .apply_snapshot(&snapshot)
            .map_err(|e| anyhow!("{}: {}", path.display(), e))?;
        info!("Loaded settings from {}", path.display());
    }
    info!(
        "{} stacks of {} shots, project `{}`",
        settings.number_stacks(),
        settings.number_shots(),
        settings.project_name()
    );

    if args.dry_run {
        warn!("Dry run: no GPIO or camera access");
    }
    let parts = platform::build_parts(&config, &output, &args.gpio_root, args.dry_run)
        .context("GPIO setup failed")?;

    let mut engine = RigEngine::new(parts, settings, &CANCEL);
    if let Err(e) = engine.apply_camera_settings() {
        warn!("camera settings not applied: {}", e);
    }

    Ok((engine, output))
}
