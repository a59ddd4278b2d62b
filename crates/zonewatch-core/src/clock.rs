//! Round clock values.
//!
//! The round clock counts down and is recorded as `"MM:SS"` text. Analysis
//! works on whole seconds, so [`ClockTime`] stores the total and formats back
//! to the zero-padded text form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A round clock reading in whole seconds.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClockTime {
    seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid clock time {input:?}, expected MM:SS")]
pub struct ClockParseError {
    input: String,
}

impl ClockParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl ClockTime {
    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Converts a mean number of seconds back into a clock reading.
    ///
    /// The fractional part is truncated. Returns `None` when `mean` is not a
    /// finite, non-negative number.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_mean_seconds(mean: f64) -> Option<Self> {
        if !mean.is_finite() || mean < 0.0 {
            return None;
        }
        Some(Self::from_seconds(mean.trunc() as u32))
    }

    #[must_use]
    pub const fn as_seconds(self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.seconds / 60
    }

    /// Seconds past the whole minute.
    #[must_use]
    pub const fn seconds_of_minute(self) -> u32 {
        self.seconds % 60
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, seconds) = s.split_once(':').ok_or_else(|| ClockParseError::new(s))?;
        if seconds.contains(':') {
            return Err(ClockParseError::new(s));
        }
        let minutes = minutes
            .trim()
            .parse::<u32>()
            .map_err(|_| ClockParseError::new(s))?;
        let seconds = seconds
            .trim()
            .parse::<u32>()
            .map_err(|_| ClockParseError::new(s))?;
        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(Self::from_seconds)
            .ok_or_else(|| ClockParseError::new(s))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds_of_minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_and_seconds() {
        assert_eq!("01:45".parse::<ClockTime>().unwrap().as_seconds(), 105);
        assert_eq!("0:07".parse::<ClockTime>().unwrap().as_seconds(), 7);
        assert_eq!(" 1 : 05 ".parse::<ClockTime>().unwrap().as_seconds(), 65);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "105", "1:2:3", "aa:10", "01:-5", "01:"] {
            let err = input.parse::<ClockTime>().unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(ClockTime::from_seconds(65).to_string(), "01:05");
        assert_eq!(ClockTime::from_seconds(0).to_string(), "00:00");
        assert_eq!(ClockTime::from_seconds(115).to_string(), "01:55");
    }

    #[test]
    fn test_from_mean_seconds_truncates() {
        assert_eq!(
            ClockTime::from_mean_seconds(89.9),
            Some(ClockTime::from_seconds(89))
        );
        assert_eq!(ClockTime::from_mean_seconds(f64::NAN), None);
        assert_eq!(ClockTime::from_mean_seconds(-1.0), None);
    }
}
