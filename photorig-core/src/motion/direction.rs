//! Turntable rotation direction

use core::fmt;
use core::str::FromStr;

/// Turntable rotation direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Clockwise,
    #[cfg_attr(feature = "serde", serde(rename = "Counter-Clockwise"))]
    CounterClockwise,
}

impl Direction {
    /// The other direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Display label, also used in exported settings
    pub fn label(self) -> &'static str {
        match self {
            Direction::Clockwise => "Clockwise",
            Direction::CounterClockwise => "Counter-Clockwise",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown direction name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseDirectionError;

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected Clockwise or Counter-Clockwise")
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("clockwise") || s.eq_ignore_ascii_case("cw") {
            Ok(Direction::Clockwise)
        } else if s.eq_ignore_ascii_case("counter-clockwise")
            || s.eq_ignore_ascii_case("counterclockwise")
            || s.eq_ignore_ascii_case("ccw")
        {
            Ok(Direction::CounterClockwise)
        } else {
            Err(ParseDirectionError)
        }
    }
}
