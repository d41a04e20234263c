//! Console commands
//!
//! One command per line:
//!
//! ```text
//! forward <steps>     reverse <steps>     home     sethome     disable
//! rotate cw|ccw       test                stack [shots]        run
//! stop                ack                 reset shot|test|stack
//! set <field> <value> recompute           export   import <file>
//! status              help                quit
//! ```

use core::str::FromStr;
use core::time::Duration;
use std::path::PathBuf;

use photorig_core::config::label;
use photorig_core::Direction;
use photorig_hal::{CameraParameter, ImageFormat};
use thiserror::Error;

/// Routine counter selected by `reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Shot,
    TestShot,
    Stack,
}

/// Settings change requested by `set`
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    CameraMovement(u32),
    DollyMovement(u32),
    ArcLength(u32),
    NumberShots(u32),
    SleepTime(Duration),
    ShotPause(Duration),
    Direction(Direction),
    ProjectName(String),
    TestDirectory(String),
    ImageFormat(ImageFormat),
    Camera(CameraParameter),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Forward(u32),
    Reverse(u32),
    Home,
    SetHome,
    Disable,
    Rotate(Direction),
    TestShot,
    /// Single stack; `None` uses the configured shot count
    Stack(Option<u32>),
    Run,
    Stop,
    Acknowledge,
    Reset(CounterKind),
    Set(SettingChange),
    Recompute,
    Export,
    Import(PathBuf),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Manual moves that watch the cancel flag outside a routine
    pub fn is_manual_motion(&self) -> bool {
        matches!(
            self,
            Command::Forward(_) | Command::Reverse(_) | Command::Home | Command::Rotate(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid value `{value}` for {what}")]
    InvalidValue { what: &'static str, value: String },
}

fn invalid(what: &'static str, value: &str) -> ParseCommandError {
    ParseCommandError::InvalidValue {
        what,
        value: value.to_string(),
    }
}

fn number<T: FromStr>(what: &'static str, value: &str) -> Result<T, ParseCommandError> {
    value.parse().map_err(|_| invalid(what, value))
}

fn shot_count(value: &str) -> Result<u32, ParseCommandError> {
    match number("shots", value)? {
        0 => Err(invalid("shots", value)),
        shots => Ok(shots),
    }
}

fn millis(what: &'static str, value: &str) -> Result<Duration, ParseCommandError> {
    number::<u64>(what, value).map(Duration::from_millis)
}

fn parse_setting(field: &str, value: &str) -> Result<SettingChange, ParseCommandError> {
    use SettingChange as S;

    let change = match field {
        "camera_movement" => S::CameraMovement(number("camera_movement", value)?),
        "dolly_movement" => S::DollyMovement(number("dolly_movement", value)?),
        "arc_length" => S::ArcLength(number("arc_length", value)?),
        "shots" => S::NumberShots(number("shots", value)?),
        "sleep_ms" => S::SleepTime(millis("sleep_ms", value)?),
        "pause_ms" => S::ShotPause(millis("pause_ms", value)?),
        "direction" => S::Direction(value.parse().map_err(|_| invalid("direction", value))?),
        "project" => S::ProjectName(value.to_string()),
        "test_dir" => S::TestDirectory(value.to_string()),
        "format" => S::ImageFormat(match value.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            _ => return Err(invalid("format", value)),
        }),
        "brightness" => S::Camera(CameraParameter::Brightness(number("brightness", value)?)),
        "contrast" => S::Camera(CameraParameter::Contrast(number("contrast", value)?)),
        "awb_mode" => S::Camera(CameraParameter::AwbMode(label(value))),
        "awb_gains" => S::Camera(CameraParameter::AwbGains(number("awb_gains", value)?)),
        "iso" => S::Camera(CameraParameter::Iso(number("iso", value)?)),
        "framerate" => S::Camera(CameraParameter::Framerate(label(value))),
        "shutter" => S::Camera(CameraParameter::ShutterSpeed(label(value))),
        other => return Err(ParseCommandError::Unknown(format!("set {}", other))),
    };
    Ok(change)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseCommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ParseCommandError::Empty),
            "forward" | "f" => Command::Forward(number("steps", arg("forward")?)?),
            "reverse" | "r" => Command::Reverse(number("steps", arg("reverse")?)?),
            "home" => Command::Home,
            "sethome" => Command::SetHome,
            "disable" => Command::Disable,
            "rotate" => {
                let value = arg("rotate")?;
                Command::Rotate(value.parse().map_err(|_| invalid("direction", value))?)
            }
            "test" => Command::TestShot,
            "stack" if rest.is_empty() => Command::Stack(None),
            "stack" => Command::Stack(Some(shot_count(rest)?)),
            "run" => Command::Run,
            "stop" => Command::Stop,
            "ack" => Command::Acknowledge,
            "reset" => Command::Reset(match arg("reset")? {
                "shot" => CounterKind::Shot,
                "test" => CounterKind::TestShot,
                "stack" => CounterKind::Stack,
                other => return Err(invalid("counter", other)),
            }),
            "set" => {
                let (field, value) = arg("set")?
                    .split_once(char::is_whitespace)
                    .ok_or(ParseCommandError::MissingArgument("set"))?;
                Command::Set(parse_setting(field, value.trim())?)
            }
            "recompute" => Command::Recompute,
            "export" => Command::Export,
            "import" => Command::Import(PathBuf::from(arg("import")?)),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, ParseCommandError> {
        line.parse()
    }

    #[test]
    fn test_motion_commands() {
        assert_eq!(parse("forward 25"), Ok(Command::Forward(25)));
        assert_eq!(parse("  r 3 "), Ok(Command::Reverse(3)));
        assert_eq!(parse("HOME"), Ok(Command::Home));
        assert_eq!(
            parse("rotate ccw"),
            Ok(Command::Rotate(Direction::CounterClockwise))
        );
        assert_eq!(
            parse("rotate Counter-Clockwise"),
            Ok(Command::Rotate(Direction::CounterClockwise))
        );
    }

    #[test]
    fn test_routine_commands() {
        assert_eq!(parse("stack"), Ok(Command::Stack(None)));
        assert_eq!(parse("stack 12"), Ok(Command::Stack(Some(12))));
        assert_eq!(parse("run"), Ok(Command::Run));
        assert_eq!(parse("reset test"), Ok(Command::Reset(CounterKind::TestShot)));
    }

    #[test]
    fn test_set_commands() {
        assert_eq!(
            parse("set dolly_movement 8"),
            Ok(Command::Set(SettingChange::DollyMovement(8)))
        );
        assert_eq!(
            parse("set pause_ms 1500"),
            Ok(Command::Set(SettingChange::ShotPause(Duration::from_millis(1500))))
        );
        assert_eq!(
            parse("set shutter 2 seconds"),
            Ok(Command::Set(SettingChange::Camera(
                CameraParameter::ShutterSpeed(label("2 seconds"))
            )))
        );
        assert_eq!(
            parse("set project beetle wing"),
            Ok(Command::Set(SettingChange::ProjectName("beetle wing".into())))
        );
        assert_eq!(
            parse("set format PNG"),
            Ok(Command::Set(SettingChange::ImageFormat(ImageFormat::Png)))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseCommandError::Empty));
        assert_eq!(parse("forward"), Err(ParseCommandError::MissingArgument("forward")));
        assert_eq!(parse("set iso"), Err(ParseCommandError::MissingArgument("set")));
        assert!(matches!(
            parse("forward -3"),
            Err(ParseCommandError::InvalidValue { what: "steps", .. })
        ));
        assert!(matches!(
            parse("set contrast 300"),
            Err(ParseCommandError::InvalidValue { what: "contrast", .. })
        ));
        assert!(matches!(
            parse("stack 0"),
            Err(ParseCommandError::InvalidValue { what: "shots", .. })
        ));
        assert!(matches!(parse("dance"), Err(ParseCommandError::Unknown(_))));
        assert!(matches!(parse("set light 1"), Err(ParseCommandError::Unknown(_))));
    }

    #[test]
    fn test_manual_motion_commands() {
        assert!(Command::Forward(3).is_manual_motion());
        assert!(Command::Home.is_manual_motion());
        assert!(Command::Rotate(Direction::Clockwise).is_manual_motion());
        assert!(!Command::Run.is_manual_motion());
        assert!(!Command::Stack(None).is_manual_motion());
        assert!(!Command::Status.is_manual_motion());
    }
}
