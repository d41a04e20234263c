//! Inter-task communication
//!
//! The console thread feeds [`COMMANDS`]; the routine task reports through
//! [`PROGRESS`]. Cancellation bypasses the queue so it reaches a routine
//! that is in the middle of a move.

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use photorig_core::{CancelFlag, Progress};

use crate::command::Command;

/// Channel capacity for console commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for progress notifications
const PROGRESS_CHANNEL_SIZE: usize = 32;

/// Commands from the console, executed one at a time
pub static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Progress from the engine, drained by the progress task
pub static PROGRESS: Channel<CriticalSectionRawMutex, Progress, PROGRESS_CHANNEL_SIZE> =
    Channel::new();

/// Cancellation request for the running operation
pub static CANCEL: CancelFlag = CancelFlag::new();

/// Set while a routine holds the rig
pub static RIG_BUSY: AtomicBool = AtomicBool::new(false);
