//! This module implements the lexical classification of an input string.
//!
//! The parser splits the input into calendar indicator, date, time, and
//! zone, then selects the date format by a fixed precedence: calendar
//! formats first, then ordinal, then week. Two packed-digit cases are
//! resolved by width alone — exactly six unsigned digits is ambiguous
//! (`YYYYMM` vs `YYMMDD`) and is rejected, while exactly seven unsigned
//! digits is always the ordinal `YYYYDDD`.
//!
//! No value ranges are checked here: a 13th month or a 25th hour lexes
//! cleanly and is rejected by the normalization stages.

pub(crate) mod timezone;

use crate::calendar::CalendarSystem;
use crate::error::EpochError;
use crate::records::{DateFields, ParsedDateTime, ZoneRecord};
use crate::EpochResult;

/// Length of a run of leading ASCII digits.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Folds an ASCII digit slice into a number. Callers bound the width.
fn fold_digits(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
}

fn digit_pair(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some((a - b'0') * 10 + (b - b'0'))
        }
        _ => None,
    }
}

/// Lexes the whole input into a [`ParsedDateTime`].
pub(crate) fn parse_date_time(input: &str) -> EpochResult<ParsedDateTime<'_>> {
    // A leading lowercase token followed by ':' names the calendar system.
    let lowercase = input.bytes().take_while(u8::is_ascii_lowercase).count();
    let (calendar, rest) = if lowercase > 0 && input.as_bytes().get(lowercase) == Some(&b':') {
        let token = &input[..lowercase];
        let system = CalendarSystem::from_ascii(token)
            .ok_or_else(|| EpochError::unsupported_calendar(token, input))?;
        (system, &input[lowercase + 1..])
    } else {
        (CalendarSystem::Gregorian, input)
    };

    if rest.is_empty() || rest.starts_with('T') {
        return Err(EpochError::missing_date(input));
    }

    let (date_text, clock_text) = match rest.split_once('T') {
        Some((date, clock)) => (date, Some(clock)),
        None => (rest, None),
    };

    let date = match detect_date(date_text) {
        DateMatch::Fields(fields) => fields,
        DateMatch::Ambiguous => return Err(EpochError::ambiguous("YYYYMM", input)),
        DateMatch::None => {
            // A bare time or zone is a missing date, not a malformed one.
            if date_text == "Z"
                || timezone::lex_time(date_text).is_some()
                || timezone::lex_offset(date_text).is_some()
            {
                return Err(EpochError::missing_date(input));
            }
            return Err(EpochError::format("date format", date_text, input));
        }
    };

    let (time, zone) = match clock_text {
        None => (None, None),
        Some(tail) => {
            let (time_text, zone) = split_zone(tail, input)?;
            let time = timezone::lex_time(time_text)
                .ok_or_else(|| EpochError::format("time format", time_text, input))?;
            (Some(time), zone)
        }
    };

    let leap_second = time.is_some_and(|t| t.second == Some(60));

    Ok(ParsedDateTime {
        calendar,
        date,
        date_text,
        time,
        zone,
        leap_second,
        input,
    })
}

/// Splits the portion after `T` into time text and zone. The zone is a
/// trailing `Z` or everything from the final sign onward; a claimed but
/// malformed zone is an error rather than time text.
fn split_zone<'a>(
    tail: &'a str,
    input: &'a str,
) -> EpochResult<(&'a str, Option<ZoneRecord<'a>>)> {
    if let Some(time_text) = tail.strip_suffix('Z') {
        return Ok((time_text, Some(ZoneRecord::Utc)));
    }
    match tail.rfind(['+', '-']) {
        Some(at) => {
            let offset = timezone::lex_offset(&tail[at..])
                .ok_or_else(|| EpochError::format("timezone offset", &tail[at..], input))?;
            Ok((&tail[..at], Some(ZoneRecord::Offset(offset))))
        }
        None => Ok((tail, None)),
    }
}

enum DateMatch {
    Fields(DateFields),
    Ambiguous,
    None,
}

/// Selects the date format. Precedence is global and first-match-wins:
/// the five calendar patterns, the two ordinal patterns, the four week
/// patterns.
fn detect_date(text: &str) -> DateMatch {
    let bytes = text.as_bytes();
    let (sign, signed) = match bytes.first() {
        Some(b'+') => (1i32, true),
        Some(b'-') => (-1i32, true),
        _ => (1i32, false),
    };
    let digits_at = usize::from(signed);
    let run = digit_run(&bytes[digits_at..]);
    let year_run = &bytes[digits_at..digits_at + run];
    let after = &bytes[digits_at + run..];

    let year = |width: usize| sign * fold_digits(&year_run[..width]) as i32;
    let extended_year = (1..=6).contains(&run);

    // Calendar: ±YYYY-MM-DD.
    if extended_year {
        if let [b'-', m0, m1, b'-', d0, d1] = after {
            if let (Some(month), Some(day)) =
                (digit_pair(&[*m0, *m1]), digit_pair(&[*d0, *d1]))
            {
                return DateMatch::Fields(DateFields::Calendar {
                    year: year(run),
                    month: Some(month),
                    day: Some(day),
                });
            }
        }
    }
    // Calendar: ±YYYY-MM.
    if extended_year {
        if let [b'-', m0, m1] = after {
            if let Some(month) = digit_pair(&[*m0, *m1]) {
                return DateMatch::Fields(DateFields::Calendar {
                    year: year(run),
                    month: Some(month),
                    day: None,
                });
            }
        }
    }
    // Exactly six unsigned digits cannot be told apart from YYMMDD.
    if !signed && run == 6 && after.is_empty() {
        return DateMatch::Ambiguous;
    }
    // Year only: 1..=6 digits, or 7 with a sign.
    if after.is_empty() && (extended_year || (signed && run == 7)) {
        return DateMatch::Fields(DateFields::Calendar {
            year: year(run),
            month: None,
            day: None,
        });
    }
    // Packed calendar: ±YYYYMMDD.
    if after.is_empty() && run == 8 {
        return DateMatch::Fields(DateFields::Calendar {
            year: year(4),
            month: digit_pair(&year_run[4..6]),
            day: digit_pair(&year_run[6..8]),
        });
    }
    // Ordinal: ±YYYY-DDD.
    if extended_year {
        if let [b'-', d0, d1, d2] = after {
            if d0.is_ascii_digit() && d1.is_ascii_digit() && d2.is_ascii_digit() {
                return DateMatch::Fields(DateFields::Ordinal {
                    year: year(run),
                    day_of_year: fold_digits(&[*d0, *d1, *d2]) as u16,
                });
            }
        }
    }
    // Packed ordinal: seven unsigned digits are always YYYYDDD.
    if !signed && run == 7 && after.is_empty() {
        return DateMatch::Fields(DateFields::Ordinal {
            year: year(4),
            day_of_year: fold_digits(&year_run[4..7]) as u16,
        });
    }
    // Week: ±YYYY-Www-D.
    if extended_year {
        if let [b'-', b'W', w0, w1, b'-', d] = after {
            if let (Some(week), true) = (digit_pair(&[*w0, *w1]), d.is_ascii_digit()) {
                return DateMatch::Fields(DateFields::Week {
                    year: year(run),
                    week,
                    weekday: Some(d - b'0'),
                });
            }
        }
    }
    // Packed week: ±YYYYWwwD.
    if run == 4 {
        if let [b'W', w0, w1, d] = after {
            if let (Some(week), true) = (digit_pair(&[*w0, *w1]), d.is_ascii_digit()) {
                return DateMatch::Fields(DateFields::Week {
                    year: year(4),
                    week,
                    weekday: Some(d - b'0'),
                });
            }
        }
    }
    // Week: ±YYYY-Www.
    if extended_year {
        if let [b'-', b'W', w0, w1] = after {
            if let Some(week) = digit_pair(&[*w0, *w1]) {
                return DateMatch::Fields(DateFields::Week {
                    year: year(run),
                    week,
                    weekday: None,
                });
            }
        }
    }
    // Packed week: ±YYYYWww.
    if run == 4 {
        if let [b'W', w0, w1] = after {
            if let Some(week) = digit_pair(&[*w0, *w1]) {
                return DateMatch::Fields(DateFields::Week {
                    year: year(4),
                    week,
                    weekday: None,
                });
            }
        }
    }

    DateMatch::None
}
