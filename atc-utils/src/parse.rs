use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub fn from_char(unit: char) -> Option<Self> {
        match unit {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
        }
    }

    pub fn seconds(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 60 * 60,
            Self::Days => 60 * 60 * 24,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,
    #[error("unknown duration unit `{0}`")]
    UnknownUnit(char),
    #[error("duration magnitude must be a whole number")]
    InvalidMagnitude,
    #[error("duration is too large")]
    Overflow,
}

/// A single-unit duration token such as `30s`, `10m`, `2h` or `1d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactDuration {
    pub magnitude: u64,
    pub unit: DurationUnit,
}

impl CompactDuration {
    /// Total seconds, or `None` when the product does not fit in a `u64`.
    pub fn checked_secs(&self) -> Option<u64> {
        self.magnitude.checked_mul(self.unit.seconds())
    }
}

impl FromStr for CompactDuration {
    type Err = DurationParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut chars = raw.chars();
        let Some(last) = chars.next_back() else {
            return Err(DurationParseError::Empty);
        };
        let digits = chars.as_str();

        let unit = DurationUnit::from_char(last).ok_or(DurationParseError::UnknownUnit(last))?;

        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DurationParseError::InvalidMagnitude);
        }

        let magnitude = digits
            .parse::<u64>()
            .map_err(|_| DurationParseError::Overflow)?;

        let duration = Self { magnitude, unit };
        if duration.checked_secs().is_none() {
            return Err(DurationParseError::Overflow);
        }

        Ok(duration)
    }
}

impl fmt::Display for CompactDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_char())
    }
}

/// Parse a compact duration token like `30s`, `10m`, `2h` or `1d` into seconds.
pub fn parse_duration_seconds(raw: &str) -> Result<u64, DurationParseError> {
    let duration = raw.parse::<CompactDuration>()?;
    duration.checked_secs().ok_or(DurationParseError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::{CompactDuration, DurationParseError, DurationUnit, parse_duration_seconds};

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration_seconds("30s"), Ok(30));
        assert_eq!(parse_duration_seconds("10m"), Ok(600));
        assert_eq!(parse_duration_seconds("2h"), Ok(7200));
        assert_eq!(parse_duration_seconds("1d"), Ok(86_400));
    }

    #[test]
    fn zero_magnitude_is_accepted() {
        assert_eq!(parse_duration_seconds("0m"), Ok(0));
    }

    #[test]
    fn multiplier_table_holds_for_a_range_of_magnitudes() {
        for unit in ['s', 'm', 'h', 'd'] {
            let multiplier = DurationUnit::from_char(unit).map(DurationUnit::seconds);
            for magnitude in [0_u64, 1, 7, 59, 365, 1000] {
                let raw = format!("{magnitude}{unit}");
                assert_eq!(
                    parse_duration_seconds(&raw).ok(),
                    multiplier.map(|value| value * magnitude),
                    "{raw}"
                );
            }
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_duration_seconds(""), Err(DurationParseError::Empty));
        assert_eq!(
            parse_duration_seconds("m"),
            Err(DurationParseError::InvalidMagnitude)
        );
        assert_eq!(
            parse_duration_seconds("10"),
            Err(DurationParseError::UnknownUnit('0'))
        );
        assert_eq!(
            parse_duration_seconds("10w"),
            Err(DurationParseError::UnknownUnit('w'))
        );
        assert_eq!(
            parse_duration_seconds("10M"),
            Err(DurationParseError::UnknownUnit('M'))
        );
        assert_eq!(
            parse_duration_seconds("-5m"),
            Err(DurationParseError::InvalidMagnitude)
        );
        assert_eq!(
            parse_duration_seconds("1.5h"),
            Err(DurationParseError::InvalidMagnitude)
        );
        assert_eq!(
            parse_duration_seconds(" 5m"),
            Err(DurationParseError::InvalidMagnitude)
        );
        assert_eq!(
            parse_duration_seconds("spamming"),
            Err(DurationParseError::UnknownUnit('g'))
        );
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        assert_eq!(
            parse_duration_seconds("\u{0665}m"),
            Err(DurationParseError::InvalidMagnitude)
        );
    }

    #[test]
    fn overflow_is_a_parse_failure() {
        assert_eq!(
            parse_duration_seconds("99999999999999999999s"),
            Err(DurationParseError::Overflow)
        );
        assert_eq!(
            parse_duration_seconds("18446744073709551615d"),
            Err(DurationParseError::Overflow)
        );
    }

    #[test]
    fn displays_as_original_token() {
        let duration: CompactDuration = "45m".parse().expect("valid duration");
        assert_eq!(duration.to_string(), "45m");
        assert_eq!(duration.unit, DurationUnit::Minutes);
        assert_eq!(duration.magnitude, 45);
    }
}
