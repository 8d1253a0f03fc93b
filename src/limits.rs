//! Input length gating.
//!
//! Every bound is checked lexically before any parsing happens, in a fixed
//! order: total input length, year digits, fractional time digits,
//! fractional offset digits, calendar indicator length. The bounded input
//! gives every later stage a hard ceiling on work per call.

use crate::error::EpochError;
use crate::EpochResult;

/// Length of a run of leading ASCII digits.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Splits the portion after `T` into time text and optional zone text.
/// The zone is a trailing `Z` or everything from the final sign onward.
fn split_zone(tail: &str) -> (&str, Option<&str>) {
    if let Some(time) = tail.strip_suffix('Z') {
        return (time, None);
    }
    match tail.rfind(['+', '-']) {
        Some(at) => (&tail[..at], Some(&tail[at..])),
        None => (tail, None),
    }
}

/// Applies every length limit to the raw input, in order.
pub(crate) fn gate(input: &str) -> EpochResult<()> {
    if input.chars().count() > crate::MAX_INPUT_LENGTH {
        return Err(EpochError::input_length(input));
    }

    // A leading lowercase run followed by ':' is the calendar indicator;
    // the year run starts after it.
    let lowercase = input
        .bytes()
        .take_while(u8::is_ascii_lowercase)
        .count();
    let (indicator, rest) = if lowercase > 0 && input.as_bytes().get(lowercase) == Some(&b':') {
        (&input[..lowercase], &input[lowercase + 1..])
    } else {
        ("", input)
    };

    // Year: the leading signed digit run. Seven digits at most, except that
    // exactly eight digits is the packed YYYYMMDD calendar form and is left
    // for the parser to split.
    let bytes = rest.as_bytes();
    let signed = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = digit_run(&bytes[signed..]);
    if digits > crate::MAX_YEAR_DIGITS && digits != 8 {
        return Err(EpochError::component_length(
            "Year",
            crate::MAX_YEAR_DIGITS,
            "digits",
            &rest[..signed + digits],
            input,
        ));
    }

    if let Some(t_at) = rest.find('T') {
        let (time, zone) = split_zone(&rest[t_at + 1..]);

        // The rightmost `.digits` group inside the time text.
        if let Some(dot) = time.rfind('.') {
            let fraction = &time[dot + 1..];
            let digits = digit_run(fraction.as_bytes());
            if digits > crate::MAX_TIME_FRACTION_DIGITS {
                return Err(EpochError::component_length(
                    "Fractional time",
                    crate::MAX_TIME_FRACTION_DIGITS,
                    "digits",
                    &fraction[..digits],
                    input,
                ));
            }
        }

        if let Some(zone) = zone {
            if let Some(dot) = zone.find('.') {
                let fraction = &zone[dot + 1..];
                let digits = digit_run(fraction.as_bytes());
                if digits > crate::MAX_OFFSET_FRACTION_DIGITS {
                    return Err(EpochError::component_length(
                        "Fractional offset",
                        crate::MAX_OFFSET_FRACTION_DIGITS,
                        "digits",
                        &fraction[..digits],
                        input,
                    ));
                }
            }
        }
    }

    if indicator.len() > crate::MAX_CALENDAR_INDICATOR_LENGTH {
        return Err(EpochError::component_length(
            "Calendar indicator",
            crate::MAX_CALENDAR_INDICATOR_LENGTH,
            "characters",
            indicator,
            input,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_inputs_within_bounds() {
        for input in [
            "2025-11-28",
            "+123456-01-01",
            "1234567",  // packed ordinal
            "12345678", // packed calendar
            "+12345678",
            "2025-11-28T12:34:56.123456789+05.1234",
            "gregorian:2025-11-28",
        ] {
            assert!(gate(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn rejects_over_length_input() {
        let input = format!("2025-11-28T12:00:00{}", " ".repeat(90));
        let err = gate(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
        assert!(err.message().starts_with("Input exceeds maximum length"));
    }

    #[test]
    fn rejects_over_length_year_runs() {
        let err = gate("123456789-01-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Year component exceeds maximum length of 7 digits: \
             '123456789' in input '123456789-01-01'"
        );
        // The sign is carried in the reported value.
        let err = gate("-12345678901").unwrap_err();
        assert!(err.message().contains("'-12345678901'"));
    }

    #[test]
    fn packed_eight_digit_dates_pass_the_year_gate() {
        assert!(gate("20251128").is_ok());
        assert!(gate("-20251128").is_ok());
    }

    #[test]
    fn rejects_over_length_fractions() {
        let err = gate("2025-11-28T12:00:00.1234567890Z").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fractional time component exceeds maximum length of 9 digits: \
             '1234567890' in input '2025-11-28T12:00:00.1234567890Z'"
        );
        let err = gate("2025-11-28T12:00+05.12345").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fractional offset component exceeds maximum length of 4 digits: \
             '12345' in input '2025-11-28T12:00+05.12345'"
        );
    }

    #[test]
    fn rejects_over_length_indicator() {
        let input = format!("{}:2025", "x".repeat(21));
        let err = gate(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
        assert!(err
            .message()
            .starts_with("Calendar indicator component exceeds maximum length of 20 characters"));
    }

    #[test]
    fn year_gate_runs_before_indicator_gate() {
        let input = format!("{}:123456789", "x".repeat(21));
        let err = gate(&input).unwrap_err();
        assert!(err.message().starts_with("Year component"));
    }

    #[test]
    fn fraction_gates_only_apply_after_t() {
        // No time portion: a dot in the date is the parser's problem.
        assert!(gate("2025.1234567890").is_ok());
    }
}
