//! Interval parsing
//!
//! Converts an interval count plus a unit token (`m`, `h`, `d`) into a
//! duration, and derives raw-data query windows from it.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use socrates_core::utils::interval::interval_to_duration;
//!
//! assert_eq!(interval_to_duration(15, "m").unwrap(), Duration::from_secs(900));
//! assert_eq!(interval_to_duration(2, "d").unwrap(), Duration::from_secs(172_800));
//! assert!(interval_to_duration(1, "w").is_err());
//! ```

use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDateTime;
use socrates_domain::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Minutes,
    Hours,
    Days,
}

impl IntervalUnit {
    pub fn seconds(self) -> u64 {
        match self {
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m" => Ok(Self::Minutes),
            "h" => Ok(Self::Hours),
            "d" => Ok(Self::Days),
            other => Err(ValidationError::UnknownIntervalUnit(other.to_string())),
        }
    }
}

/// `count` units as a [`Duration`].
///
/// # Errors
/// [`ValidationError::UnknownIntervalUnit`] for any token other than `m`,
/// `h` or `d`.
pub fn interval_to_duration(count: u64, unit: &str) -> Result<Duration, ValidationError> {
    let unit: IntervalUnit = unit.parse()?;
    Ok(Duration::from_secs(count.saturating_mul(unit.seconds())))
}

/// Window `[end - count units, end]`.
///
/// # Errors
/// Fails like [`interval_to_duration`]; windows reaching before the
/// representable range are clamped to its minimum.
pub fn lookback_window(
    end: NaiveDateTime,
    count: u64,
    unit: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), ValidationError> {
    let span = interval_to_duration(count, unit)?;
    let start = chrono::Duration::from_std(span)
        .ok()
        .and_then(|span| end.checked_sub_signed(span))
        .unwrap_or(NaiveDateTime::MIN);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn converts_each_unit() {
        assert_eq!(interval_to_duration(5, "m").unwrap(), Duration::from_secs(300));
        assert_eq!(interval_to_duration(3, "h").unwrap(), Duration::from_secs(10_800));
        assert_eq!(interval_to_duration(1, "d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(interval_to_duration(0, "d").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_unknown_units() {
        assert_eq!(
            interval_to_duration(5, "s"),
            Err(ValidationError::UnknownIntervalUnit("s".to_string()))
        );
        assert!(interval_to_duration(5, "").is_err());
        assert!(interval_to_duration(5, "M").is_err());
    }

    #[test]
    fn window_ends_at_given_instant() {
        let end = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let (start, window_end) = lookback_window(end, 2, "h").unwrap();
        assert_eq!(window_end, end);
        assert_eq!(start, end - chrono::Duration::hours(2));
    }

    #[test]
    fn huge_windows_clamp() {
        let end = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let (start, _) = lookback_window(end, u64::MAX, "d").unwrap();
        assert_eq!(start, NaiveDateTime::MIN);
    }
}
