//! Line-oriented operator console on stdin
//!
//! Runs on its own thread so `stop` is seen while a routine holds the
//! executor.

use std::io::{self, BufRead};
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

use embassy_futures::block_on;
use log::{error, info, warn};

use crate::channels::{CANCEL, COMMANDS, RIG_BUSY};
use crate::command::Command;

const HELP: &str = "\
forward <steps> | reverse <steps>   move the slider
home | sethome | disable            homing and coil release
rotate cw|ccw                       one turntable step
test                                test shot into the test directory
stack [shots] | run                 single stack or full routine
stop | ack                          cancel, then clear the fault
reset shot|test|stack               counter reset
set <field> <value>                 camera_movement dolly_movement arc_length shots
                                    sleep_ms pause_ms direction project test_dir format
                                    brightness contrast awb_mode awb_gains iso
                                    framerate shutter
recompute                           recompute the number of stacks
export | import <file>              JSON settings files
status | help | quit
";

pub fn spawn_console() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(run_console)
}

fn run_console() {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("console: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => dispatch(command),
            Err(e) => warn!("{}", e),
        }
    }
    dispatch(Command::Quit);
}

fn dispatch(command: Command) {
    match command {
        Command::Stop => {
            CANCEL.cancel();
            info!("stop requested");
        }
        Command::Help => print!("{}", HELP),
        Command::Quit => {
            CANCEL.cancel();
            block_on(COMMANDS.send(Command::Quit));
        }
        _ if RIG_BUSY.load(Ordering::Acquire) => {
            warn!("routine in progress, settings are locked; `stop` cancels it")
        }
        command => block_on(COMMANDS.send(command)),
    }
}
