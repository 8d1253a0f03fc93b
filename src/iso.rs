//! This module implements the validated ISO date record.
//!
//! [`normalize_date`] turns lexed date fields into a canonical
//! year/month/day, enforcing (in order) the year range, the per-format
//! component ranges, the leap-year rules, and the ISO-week rules. The
//! first violation aborts the pipeline.

use crate::error::EpochError;
use crate::records::{DateFields, ParsedDateTime};
use crate::{utils, EpochResult};

/// A validated proleptic-Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct IsoDate {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
}

impl IsoDate {
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Days from 1970-01-01 to this date.
    pub(crate) fn to_epoch_days(self) -> i64 {
        utils::days_since_epoch(self.year, self.month, self.day)
    }

    /// This date stepped by `n` days.
    pub(crate) fn add_days(self, n: i64) -> Self {
        let (year, month, day) = utils::add_days(self.year, self.month, self.day, n);
        Self { year, month, day }
    }
}

/// Validates the record's date fields and resolves them to an [`IsoDate`].
pub(crate) fn normalize_date(record: &ParsedDateTime<'_>) -> EpochResult<IsoDate> {
    let input = record.input;

    // Year 0 does not exist: -0001 is the year before 0001.
    let year = record.date.year();
    if year == 0 || !(crate::MIN_YEAR..=crate::MAX_YEAR).contains(&year) {
        return Err(EpochError::year_range(i64::from(year), input));
    }

    match record.date {
        DateFields::Calendar { year, month, day } => {
            let month = month.unwrap_or(1);
            if !(1..=12).contains(&month) {
                return Err(EpochError::component("month", month, input));
            }
            let day = day.unwrap_or(1);
            if day == 0 || day > utils::days_in_month(year, month) {
                return Err(EpochError::component("day", day, input));
            }
            Ok(IsoDate::new_unchecked(year, month, day))
        }
        DateFields::Ordinal { year, day_of_year } => {
            if day_of_year == 0 || day_of_year > 366 {
                return Err(EpochError::component("ordinal day", day_of_year, input));
            }
            if day_of_year > utils::days_in_year(year) {
                return Err(EpochError::component("ordinal day", day_of_year, input));
            }
            let mut month = 1u8;
            let mut remaining = day_of_year;
            while remaining > u16::from(utils::days_in_month(year, month)) {
                remaining -= u16::from(utils::days_in_month(year, month));
                month += 1;
            }
            Ok(IsoDate::new_unchecked(year, month, remaining as u8))
        }
        DateFields::Week {
            year,
            week,
            weekday,
        } => {
            if week == 0 || week > 53 {
                return Err(EpochError::component("week", week, input));
            }
            let weekday = weekday.unwrap_or(1);
            if weekday == 0 || weekday > 7 {
                return Err(EpochError::component("weekday", weekday, input));
            }
            if week > utils::max_weeks_in_year(year) {
                return Err(EpochError::component("week", week, input));
            }
            // Week 1 is the week containing Jan 4. Step back to its Monday,
            // then forward; the result may sit in the neighbouring year.
            let jan_fourth = utils::day_of_week(year, 1, 4);
            let offset = i64::from(week - 1) * 7 + i64::from(weekday - 1)
                - i64::from(jan_fourth - 1);
            let (y, m, d) = utils::add_days(year, 1, 4, offset);
            Ok(IsoDate::new_unchecked(y, m, d))
        }
    }
}
