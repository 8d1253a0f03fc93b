//! `epochal` converts a single date or date-time string — any supported
//! ISO 8601 variant, or a date in one of six alternative calendar systems —
//! into a Unix epoch value in UTC seconds.
//!
//! The conversion is one pure function, [`convert`]:
//!
//! ```
//! use epochal::convert;
//!
//! assert_eq!(convert("2025-11-28").unwrap().to_string(), "1764288000");
//! assert_eq!(
//!     convert("2025-11-28T12:34:56.789Z").unwrap().to_string(),
//!     "1764333296.789"
//! );
//! assert_eq!(convert("julian:2025-11-15").unwrap().to_string(), "1764288000");
//! assert_eq!(convert("-0001-01-01T00:00:00Z").unwrap().to_string(), "-62167219200");
//! ```
//!
//! The output renders as an integer when the input has no sub-second
//! component and as a decimal with up to nine fractional digits otherwise;
//! dates before 1970 are negative. Inputs that fail to convert produce a
//! single-line [`EpochError`] naming the offending component:
//!
//! ```
//! use epochal::convert;
//!
//! let err = convert("202511").unwrap_err();
//! assert_eq!(err.to_string(), "Ambiguous date format 'YYYYMM' in input '202511'");
//! ```
//!
//! Accepted date shapes are calendar (`2025-11-28`, `20251128`, `2025-11`,
//! `2025`), ordinal (`2025-332`, `2025332`), and ISO week (`2025-W48-5`,
//! `2025W485`), each with an optional `T`-separated time (`hh[:mm[:ss]]`,
//! packed digits allowed, one decimal fraction on the smallest unit) and
//! zone (`Z`, `±hh`, `±hhmm`, `±hh:mm`, `±hh.dddd`). A lowercase
//! `calendar:` prefix selects one of the seven [`CalendarSystem`]s. A
//! seconds value of `60` is accepted anywhere and treated as the following
//! second.
//!
//! Every conversion is deterministic: no clock, locale, or host time zone
//! is consulted, and the same input always produces the bit-identical
//! result. Named time zones, durations, and formatting epoch values back
//! into text are out of scope.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub mod error;

pub(crate) mod calendar;
pub(crate) mod epoch;
pub(crate) mod iso;
pub(crate) mod limits;
pub(crate) mod parsers;
pub(crate) mod records;
pub(crate) mod time;
pub(crate) mod utils;

/// Re-export of `TinyAsciiStr` from `tinystr`, used for calendar
/// identifiers.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use calendar::CalendarSystem;
#[doc(inline)]
pub use epoch::Epoch;
#[doc(inline)]
pub use error::{EpochError, ErrorKind};

/// The conversion result type.
pub type EpochResult<T> = Result<T, EpochError>;

// Relevant numeric constants; all bit-stable contract values.

/// Greatest accepted input length, in characters.
pub const MAX_INPUT_LENGTH: usize = 100;
/// Greatest accepted number of year digits.
pub const MAX_YEAR_DIGITS: usize = 7;
/// Greatest accepted number of fractional time digits.
pub const MAX_TIME_FRACTION_DIGITS: usize = 9;
/// Greatest accepted number of fractional offset digits.
pub const MAX_OFFSET_FRACTION_DIGITS: usize = 4;
/// Greatest accepted calendar indicator length, in characters.
pub const MAX_CALENDAR_INDICATOR_LENGTH: usize = 20;
/// Smallest supported year.
pub const MIN_YEAR: i32 = -999_999;
/// Greatest supported year.
pub const MAX_YEAR: i32 = 999_999;
/// Seconds per day constant: 86 400.
pub const SECONDS_PER_DAY: u32 = 86_400;

pub(crate) const NS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NS_PER_DAY: i64 = SECONDS_PER_DAY as i64 * NS_PER_SECOND;

/// Converts a date or date-time string to its Unix epoch value.
///
/// The pipeline is a fixed sequence of pure stages — length gate, lexer,
/// calendar conversion, date normalization, time and zone normalization,
/// epoch computation — and the first failing stage reports the error.
///
/// ```
/// use epochal::convert;
///
/// let epoch = convert("2020-W01-1").unwrap();
/// assert_eq!(epoch.epoch_seconds(), 1_577_664_000); // 2019-12-30T00:00:00Z
/// ```
pub fn convert(input: &str) -> EpochResult<Epoch> {
    limits::gate(input)?;
    let parsed = parsers::parse_date_time(input)?;
    let converted = calendar::convert_to_gregorian(parsed)?;
    let date = iso::normalize_date(&converted)?;
    let normalized = time::normalize_time(date, &converted)?;
    Ok(epoch::from_normalized(normalized))
}
