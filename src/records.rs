//! Parsed intermediate records.
//!
//! These are types which have been *lexed* from an input string but not yet
//! validated: a month of 13 or an hour of 25 still lives happily in a
//! record. Validation is the business of the normalization stages, which
//! consume these records and construct their own.

use crate::calendar::CalendarSystem;

/// The three date shapes the grammar can produce, as a proper tagged union.
///
/// Absent calendar month/day floor to 1; an absent week day is Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateFields {
    /// `YYYY[-MM[-DD]]` and the packed `YYYYMMDD` form.
    Calendar {
        year: i32,
        month: Option<u8>,
        day: Option<u8>,
    },
    /// `YYYY-DDD` and the packed `YYYYDDD` form.
    Ordinal { year: i32, day_of_year: u16 },
    /// `YYYY-Www[-D]` and the packed `YYYYWww[D]` forms.
    Week {
        year: i32,
        week: u8,
        weekday: Option<u8>,
    },
}

impl DateFields {
    /// The year as written, before any calendar conversion.
    pub(crate) fn year(&self) -> i32 {
        match *self {
            DateFields::Calendar { year, .. }
            | DateFields::Ordinal { year, .. }
            | DateFields::Week { year, .. } => year,
        }
    }
}

/// A literal decimal fraction: the digit string `.digits`, preserved
/// exactly so truncation can honour the written precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fraction {
    /// The digits as an integer, e.g. `789` for `.789`.
    pub(crate) digits: u32,
    /// How many digits were written, e.g. 3 for `.789`.
    pub(crate) len: u8,
}

impl Fraction {
    /// Parses a run of 1..=9 ASCII digits.
    pub(crate) fn from_ascii(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 9 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let mut digits = 0u32;
        for &b in bytes {
            digits = digits * 10 + u32::from(b - b'0');
        }
        Some(Self {
            digits,
            len: bytes.len() as u8,
        })
    }
}

/// The unit the time fraction scales: always the smallest unit present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FractionalUnit {
    Hour,
    Minute,
    Second,
}

/// A lexed time of day. Values are unvalidated digit pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeRecord {
    pub(crate) hour: u8,
    pub(crate) minute: Option<u8>,
    pub(crate) second: Option<u8>,
    pub(crate) fraction: Option<Fraction>,
    pub(crate) unit: FractionalUnit,
}

/// A lexed UTC offset, e.g. `+05:30` or `-08.25`. `text` keeps the exact
/// source spelling for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UtcOffsetRecord<'a> {
    pub(crate) sign: i8,
    pub(crate) hours: u8,
    pub(crate) minutes: Option<u8>,
    pub(crate) fraction: Option<Fraction>,
    pub(crate) text: &'a str,
}

/// The zone designator: `Z`, or a signed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneRecord<'a> {
    Utc,
    Offset(UtcOffsetRecord<'a>),
}

/// A fully lexed, unvalidated date-time: the parser's output and the
/// converter's input. The original input rides along for error context.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedDateTime<'a> {
    pub(crate) calendar: CalendarSystem,
    pub(crate) date: DateFields,
    /// The date portion as written, e.g. `2025-123` of `islamic:2025-123T12:00`.
    pub(crate) date_text: &'a str,
    pub(crate) time: Option<TimeRecord>,
    pub(crate) zone: Option<ZoneRecord<'a>>,
    /// True when the seconds field is written `60`.
    pub(crate) leap_second: bool,
    pub(crate) input: &'a str,
}
