//! Severity levels and level masks
//!
//! Levels follow the syslog convention: lower numeric value means higher
//! severity. All mask arithmetic relies on that inversion, so `up_to(Error)`
//! covers emergency through error, not error through debug.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use super::error::LogError;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl Level {
    /// All levels in severity order, most severe first.
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Canonical lowercase name of the level.
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Numeric value of the level (0 = most severe).
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// True if `self` is at least as severe as `other`.
    #[inline]
    pub const fn at_least_as_severe_as(self, other: Level) -> bool {
        (self as u8) <= (other as u8)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Emergency | Level::Alert => BrightRed,
            Level::Critical | Level::Error => Red,
            Level::Warning => Yellow,
            Level::Notice => Cyan,
            Level::Info => Green,
            Level::Debug => BrightBlack,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emergency" | "emerg" => Ok(Level::Emergency),
            "alert" => Ok(Level::Alert),
            "critical" | "crit" => Ok(Level::Critical),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "notice" => Ok(Level::Notice),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(LogError::UnknownLevelName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, LogError> {
        match value {
            0 => Ok(Level::Emergency),
            1 => Ok(Level::Alert),
            2 => Ok(Level::Critical),
            3 => Ok(Level::Error),
            4 => Ok(Level::Warning),
            5 => Ok(Level::Notice),
            6 => Ok(Level::Info),
            7 => Ok(Level::Debug),
            _ => Err(LogError::InvalidLevel(value)),
        }
    }
}

/// Bitset over the eight levels, one bit per numeric level value.
///
/// A logger only dispatches events whose level bit is set in its active
/// mask. The default mask accepts every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelMask(u8);

impl LevelMask {
    /// Mask accepting no levels.
    pub const NONE: LevelMask = LevelMask(0);

    /// Mask accepting every level.
    pub const ALL: LevelMask = LevelMask(0xff);

    /// Mask covering exactly the given level.
    #[must_use]
    pub const fn only(level: Level) -> Self {
        LevelMask(1 << level as u8)
    }

    /// Mask covering the given level and every more severe one.
    ///
    /// Severity decreases with the numeric value, so this is the contiguous
    /// run of bits 0..=level: `up_to(Error)` is emergency..error.
    #[must_use]
    pub const fn up_to(level: Level) -> Self {
        LevelMask(((1u16 << (level as u8 + 1)) - 1) as u8)
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        LevelMask(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, level: Level) -> bool {
        self.0 & (1 << level as u8) != 0
    }

    #[must_use]
    pub const fn with(self, level: Level) -> Self {
        LevelMask(self.0 | (1 << level as u8))
    }

    #[must_use]
    pub const fn without(self, level: Level) -> Self {
        LevelMask(self.0 & !(1 << level as u8))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for LevelMask {
    fn default() -> Self {
        LevelMask::ALL
    }
}

impl BitOr for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 | rhs.0)
    }
}

impl BitAnd for LevelMask {
    type Output = LevelMask;

    fn bitand(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Level::Emergency < Level::Debug);
        assert!(Level::Error.at_least_as_severe_as(Level::Warning));
        assert!(!Level::Notice.at_least_as_severe_as(Level::Warning));
        assert!(Level::Info.at_least_as_severe_as(Level::Info));
    }

    #[test]
    fn test_only_sets_single_bit() {
        assert_eq!(LevelMask::only(Level::Emergency).bits(), 0b0000_0001);
        assert_eq!(LevelMask::only(Level::Error).bits(), 0b0000_1000);
        assert_eq!(LevelMask::only(Level::Debug).bits(), 0b1000_0000);
    }

    #[test]
    fn test_up_to_is_low_order_run() {
        assert_eq!(LevelMask::up_to(Level::Emergency).bits(), 0b0000_0001);
        assert_eq!(LevelMask::up_to(Level::Error).bits(), 0b0000_1111);
        assert_eq!(LevelMask::up_to(Level::Debug), LevelMask::ALL);
    }

    #[test]
    fn test_up_to_error_excludes_less_severe() {
        let mask = LevelMask::up_to(Level::Error);
        assert!(mask.contains(Level::Emergency));
        assert!(mask.contains(Level::Error));
        assert!(!mask.contains(Level::Warning));
        assert!(!mask.contains(Level::Info));
    }

    #[test]
    fn test_mask_set_operations() {
        let mask = LevelMask::NONE.with(Level::Alert).with(Level::Info);
        assert!(mask.contains(Level::Alert));
        assert!(mask.contains(Level::Info));
        assert!(!mask.contains(Level::Debug));
        assert!(!mask.without(Level::Alert).contains(Level::Alert));

        let union = LevelMask::only(Level::Alert) | LevelMask::only(Level::Info);
        assert_eq!(union, mask);
        assert_eq!(union & LevelMask::only(Level::Alert), LevelMask::only(Level::Alert));
    }

    #[test]
    fn test_default_mask_accepts_everything() {
        let mask = LevelMask::default();
        for level in Level::ALL {
            assert!(mask.contains(level));
        }
    }

    #[test]
    fn test_name_round_trip() {
        for level in Level::ALL {
            let parsed: Level = level.name().parse().expect("canonical name parses");
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_name() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, LogError::UnknownLevelName(_)));
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Level::try_from(3).unwrap(), Level::Error);
        let err = Level::try_from(8).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(8)));
    }
}
