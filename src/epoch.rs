//! Epoch assembly and the output value type.
//!
//! The final stage: fold a pending leap-second carry into the date (this
//! runs after the zone rollover and composes with it), count days from
//! 1970-01-01, and assemble `days * 86400s + time` in nanoseconds.

use core::fmt;

use crate::time::NormalizedDateTime;
use crate::{NS_PER_DAY, NS_PER_SECOND};

/// A Unix epoch instant in UTC.
///
/// `Display` renders the conversion contract: a plain integer of seconds
/// when the input carried no sub-second component, otherwise a decimal
/// with up to nine fractional digits, trailing zeros trimmed. Two instants
/// at the same nanosecond compare equal only if they agree on being
/// fractional; `123` and `123.0` are distinct outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch {
    nanoseconds: i128,
    fractional: bool,
}

/// Applies the leap-second fold and computes the epoch value.
pub(crate) fn from_normalized(normalized: NormalizedDateTime) -> Epoch {
    let mut date = normalized.date;
    let mut nanos = normalized.nanosecond_of_day;
    // A written `:60` that carried to a full day is the next midnight.
    if nanos >= NS_PER_DAY {
        nanos -= NS_PER_DAY;
        date = date.add_days(1);
    }
    let nanoseconds =
        i128::from(date.to_epoch_days()) * i128::from(NS_PER_DAY) + i128::from(nanos);
    Epoch {
        nanoseconds,
        fractional: normalized.fractional,
    }
}

impl Epoch {
    /// Whole seconds since 1970-01-01T00:00:00Z, truncated toward zero.
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        (self.nanoseconds / i128::from(NS_PER_SECOND)) as i64
    }

    /// The instant in milliseconds since the epoch, truncated toward zero.
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i128 {
        self.nanoseconds / 1_000_000
    }

    /// The instant in microseconds since the epoch, truncated toward zero.
    #[must_use]
    pub fn epoch_microseconds(&self) -> i128 {
        self.nanoseconds / 1_000
    }

    /// The magnitude's sub-second part in nanoseconds.
    #[must_use]
    pub fn subsec_nanoseconds(&self) -> u32 {
        (self.nanoseconds.unsigned_abs() % NS_PER_SECOND as u128) as u32
    }

    /// Whether the input carried a sub-second component. A written
    /// fraction counts even when its value is zero (`.0` renders `.0`).
    #[must_use]
    pub fn is_fractional(&self) -> bool {
        self.fractional
    }

    /// The instant in nanoseconds since the epoch.
    #[must_use]
    pub fn as_nanoseconds(&self) -> i128 {
        self.nanoseconds
    }

    /// The instant as a float of seconds. Lossy for values far from the
    /// epoch; `Display` is the lossless rendering.
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.nanoseconds as f64 / 1e9
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanoseconds < 0 {
            f.write_str("-")?;
        }
        let magnitude = self.nanoseconds.unsigned_abs();
        let seconds = magnitude / NS_PER_SECOND as u128;
        if !self.fractional {
            return write!(f, "{seconds}");
        }
        let nanos = (magnitude % NS_PER_SECOND as u128) as u32;
        let digits = format!("{nanos:09}");
        let trimmed = digits.trim_end_matches('0');
        let fraction = if trimmed.is_empty() { "0" } else { trimmed };
        write!(f, "{seconds}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso::IsoDate;

    fn normalized(date: IsoDate, nanosecond_of_day: i64, fractional: bool) -> NormalizedDateTime {
        NormalizedDateTime {
            date,
            nanosecond_of_day,
            fractional,
        }
    }

    #[test]
    fn whole_second_assembly() {
        let epoch = from_normalized(normalized(
            IsoDate::new_unchecked(2024, 11, 28),
            45_296 * NS_PER_SECOND,
            false,
        ));
        assert_eq!(epoch.epoch_seconds(), 20_055 * 86_400 + 45_296);
        assert_eq!(epoch.to_string(), "1732797296");
        assert!(!epoch.is_fractional());
    }

    #[test]
    fn leap_second_folds_into_the_next_day() {
        let epoch = from_normalized(normalized(
            IsoDate::new_unchecked(2016, 12, 31),
            NS_PER_DAY,
            false,
        ));
        assert_eq!(epoch.to_string(), "1483228800");
    }

    #[test]
    fn fractional_rendering_trims_trailing_zeros() {
        let epoch = from_normalized(normalized(
            IsoDate::new_unchecked(1970, 1, 1),
            789_000_000,
            true,
        ));
        assert_eq!(epoch.to_string(), "0.789");
        assert_eq!(epoch.subsec_nanoseconds(), 789_000_000);

        let epoch = from_normalized(normalized(
            IsoDate::new_unchecked(1970, 1, 1),
            123_456_789 + NS_PER_SECOND,
            true,
        ));
        assert_eq!(epoch.to_string(), "1.123456789");
        assert_eq!(epoch.epoch_milliseconds(), 1_123);
        assert_eq!(epoch.epoch_microseconds(), 1_123_456);
        assert_eq!(epoch.as_nanoseconds(), 1_123_456_789);
    }

    #[test]
    fn zero_valued_fraction_still_renders() {
        let epoch = from_normalized(normalized(IsoDate::new_unchecked(1970, 1, 1), 0, true));
        assert_eq!(epoch.to_string(), "0.0");
    }

    #[test]
    fn negative_fractional_values() {
        // Half a second before the epoch.
        let epoch = from_normalized(normalized(
            IsoDate::new_unchecked(1969, 12, 31),
            NS_PER_DAY - 500_000_000,
            true,
        ));
        assert_eq!(epoch.to_string(), "-0.5");
        // Truncation toward zero: -0.5 s is second 0.
        assert_eq!(epoch.epoch_seconds(), 0);
        assert_eq!(epoch.subsec_nanoseconds(), 500_000_000);
    }

    #[test]
    fn pre_epoch_dates_are_negative() {
        let epoch = from_normalized(normalized(IsoDate::new_unchecked(-1, 1, 1), 0, false));
        assert_eq!(epoch.to_string(), "-62167219200");
        assert_eq!(epoch.epoch_seconds(), -62_167_219_200);
    }
}
