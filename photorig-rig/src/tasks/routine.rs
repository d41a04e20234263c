//! Routine task
//!
//! Owns the engine and executes console commands one at a time. Routines
//! run to completion here; `stop` reaches them through the cancel flag.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{error, info, warn};
use photorig_core::{RoutineError, SettingsError};
use photorig_engine::RigEngine;
use thiserror::Error;

use crate::channels::{CANCEL, COMMANDS};
use crate::command::{Command, CounterKind, SettingChange};
use crate::platform::HostRig;
use crate::settings_file::{export_settings, import_settings, SettingsFileError};

pub type HostEngine = RigEngine<'static, HostRig>;

#[derive(Debug, Error)]
enum CommandError {
    #[error("{0}")]
    Routine(RoutineError),
    #[error("{0}")]
    Settings(SettingsError),
    #[error(transparent)]
    File(#[from] SettingsFileError),
}

impl From<RoutineError> for CommandError {
    fn from(e: RoutineError) -> Self {
        CommandError::Routine(e)
    }
}

impl From<SettingsError> for CommandError {
    fn from(e: SettingsError) -> Self {
        CommandError::Settings(e)
    }
}

/// Execute console commands until `quit`
pub async fn routine_task(mut engine: HostEngine, output: PathBuf) {
    info!("routine task ready, output in {}", output.display());

    loop {
        let command = COMMANDS.receive().await;
        if command == Command::Quit {
            release(&mut engine);
            return;
        }
        if let Err(e) = execute(&mut engine, command, &output).await {
            error!("{}", e);
        }
    }
}

fn release(engine: &mut HostEngine) {
    if let Err(e) = engine.disable_slider() {
        warn!("{}", e);
    }
    if let Err(e) = engine.stop_turntable() {
        warn!("{}", e);
    }
}

async fn execute(
    engine: &mut HostEngine,
    command: Command,
    output: &Path,
) -> Result<(), CommandError> {
    // Routines clear the flag when they start; manual moves clear it here
    if command.is_manual_motion() && CANCEL.is_cancelled() {
        info!("dropping stop left over from an earlier command");
        CANCEL.reset();
    }

    match command {
        Command::Forward(steps) => engine.move_forward(steps).await?,
        Command::Reverse(steps) => engine.move_reverse(steps).await?,
        Command::Home => engine.go_home().await?,
        Command::SetHome => engine.set_home()?,
        Command::Disable => {
            engine.disable_slider()?;
            engine.stop_turntable()?;
        }
        Command::Rotate(direction) => engine.rotate(direction).await?,
        Command::TestShot => engine.capture_test_shot().await?,
        Command::Stack(shots) => {
            let shots = shots.unwrap_or(engine.settings().number_shots());
            engine.run_stack(shots).await?;
        }
        Command::Run => {
            let stacks = engine.run_full_routine().await?;
            info!("{} stacks written to {}", stacks, output.display());
        }
        Command::Acknowledge => {
            if !engine.acknowledge_fault() {
                info!("no fault to acknowledge");
            }
        }
        Command::Reset(CounterKind::Shot) => engine.reset_shot_number()?,
        Command::Reset(CounterKind::TestShot) => engine.reset_test_shot_number()?,
        Command::Reset(CounterKind::Stack) => engine.reset_stack_number()?,
        Command::Set(change) => apply_change(engine, change)?,
        Command::Recompute => {
            let stacks = engine.configure(|s| s.recompute_number_stacks())?;
            info!("number of stacks: {}", stacks);
        }
        Command::Export => {
            let path = export_settings(engine.settings(), output, &Local::now())?;
            info!("settings exported to {}", path.display());
        }
        Command::Import(path) => {
            let snapshot = import_settings(&path)?;
            engine.configure(|s| s.apply_snapshot(&snapshot))?;
            engine.apply_camera_settings()?;
            info!("settings imported from {}", path.display());
        }
        Command::Status => print_status(engine),
        // Answered on the console thread
        Command::Stop | Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn apply_change(engine: &mut HostEngine, change: SettingChange) -> Result<(), CommandError> {
    use SettingChange as S;

    match change {
        S::Camera(parameter) => engine.set_camera_parameter(&parameter)?,
        S::CameraMovement(steps) => engine.configure(|s| s.set_camera_movement(steps))?,
        S::DollyMovement(units) => {
            engine.configure(|s| s.set_dolly_movement(units))?;
            info!("number of stacks: {}", engine.settings().number_stacks());
        }
        S::ArcLength(degrees) => {
            engine.configure(|s| s.set_arc_length(degrees))?;
            info!("number of stacks: {}", engine.settings().number_stacks());
        }
        S::NumberShots(shots) => engine.configure(|s| s.set_number_shots(shots))?,
        S::SleepTime(delay) => engine.configure(|s| s.set_sleep_time(delay))?,
        S::ShotPause(pause) => engine.configure(|s| s.set_shot_pause(pause))?,
        S::Direction(direction) => engine.configure(|s| s.set_direction(direction))?,
        S::ProjectName(name) => engine.configure(|s| s.set_project_name(&name))?,
        S::TestDirectory(dir) => engine.configure(|s| s.set_test_directory(&dir))?,
        S::ImageFormat(format) => engine.configure(|s| s.set_image_format(format))?,
    }
    Ok(())
}

fn print_status(engine: &HostEngine) {
    let settings = engine.settings();
    let motion = settings.motion();
    let counters = engine.counters();

    println!("state:            {}", engine.state());
    println!("slider position:  {}", engine.slider_position().steps());
    println!(
        "counters:         stack {} shot {} test shot {}",
        counters.stack_number(),
        counters.shot_number(),
        counters.test_shot_number()
    );
    println!("project:          {}", settings.project_name());
    println!(
        "stacks:           {} x {} shots, {}",
        settings.number_stacks(),
        settings.number_shots(),
        settings.direction()
    );
    println!(
        "motion:           camera {} dolly {} arc {}",
        motion.camera_movement, motion.dolly_movement, motion.arc_length
    );
    println!(
        "timing:           phase {:?} pause {:?}",
        motion.sleep_time, motion.shot_pause
    );
}
