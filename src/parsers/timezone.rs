//! Time-of-day and UTC-offset lexing.
//!
//! Both lexers are pure shape classifiers: they accept any digit values
//! that fit the pattern (`99:99` lexes fine) and leave range validation to
//! the normalization stage. A failed match returns `None`; the caller
//! decides which error that becomes.

use crate::records::{Fraction, FractionalUnit, TimeRecord, UtcOffsetRecord};

/// Parses exactly two ASCII digits.
fn digit_pair(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some((a - b'0') * 10 + (b - b'0'))
        }
        _ => None,
    }
}

/// Classifies a time token.
///
/// The accepted shapes, most specific first: `hh:mm:ss[.f]`, `hhmmss[.f]`,
/// `hh:mm[.f]`, `hhmm[.f]`, `hh[.f]`. A fraction always belongs to the
/// smallest unit present.
pub(crate) fn lex_time(text: &str) -> Option<TimeRecord> {
    let (head, fraction) = match text.split_once('.') {
        Some((head, digits)) => (head, Some(Fraction::from_ascii(digits.as_bytes())?)),
        None => (text, None),
    };

    let b = head.as_bytes();
    let (hour, minute, second, unit) = match b.len() {
        8 if b[2] == b':' && b[5] == b':' => (
            digit_pair(&b[0..2])?,
            Some(digit_pair(&b[3..5])?),
            Some(digit_pair(&b[6..8])?),
            FractionalUnit::Second,
        ),
        6 => (
            digit_pair(&b[0..2])?,
            Some(digit_pair(&b[2..4])?),
            Some(digit_pair(&b[4..6])?),
            FractionalUnit::Second,
        ),
        5 if b[2] == b':' => (
            digit_pair(&b[0..2])?,
            Some(digit_pair(&b[3..5])?),
            None,
            FractionalUnit::Minute,
        ),
        4 => (
            digit_pair(&b[0..2])?,
            Some(digit_pair(&b[2..4])?),
            None,
            FractionalUnit::Minute,
        ),
        2 => (digit_pair(&b[0..2])?, None, None, FractionalUnit::Hour),
        _ => return None,
    };

    Some(TimeRecord {
        hour,
        minute,
        second,
        fraction,
        unit,
    })
}

/// Classifies a signed offset token: `±hh`, `±hhmm`, `±hh:mm`, or
/// `±hh.dddd`. The source text rides along for error reporting.
pub(crate) fn lex_offset(text: &str) -> Option<UtcOffsetRecord<'_>> {
    let b = text.as_bytes();
    let sign: i8 = match b.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let rest = &b[1..];
    if rest.len() < 2 {
        return None;
    }
    let hours = digit_pair(&rest[0..2])?;

    let (minutes, fraction) = match &rest[2..] {
        [] => (None, None),
        [b':', m @ ..] => (Some(digit_pair(m)?), None),
        [b'.', f @ ..] => (None, Some(Fraction::from_ascii(f)?)),
        m => (Some(digit_pair(m)?), None),
    };

    Some(UtcOffsetRecord {
        sign,
        hours,
        minutes,
        fraction,
        text,
    })
}
