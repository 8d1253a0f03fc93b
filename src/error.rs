//! This module implements the conversion error type.
//!
//! Every failure in the pipeline surfaces as a single [`EpochError`]: a
//! closed [`ErrorKind`] paired with a one-line, user-visible message that
//! names the offending component, its value, and the original input. The
//! first error raised aborts the pipeline; no partial result escapes.

use core::fmt;

/// The closed set of failure categories.
///
/// The validation order is fixed: length limits, lexical format, calendar
/// indicator, year range, component ranges, leap-year rules, ISO-week rules,
/// timezone offset. Only the first violation encountered is reported.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The whole input or one of its bounded components is too long.
    Length,
    /// The input does not match any recognised ISO 8601 variant.
    Format,
    /// Exactly six unsigned digits: `YYYYMM` cannot be told apart from
    /// `YYMMDD` and is rejected rather than guessed at.
    Ambiguous,
    /// The calendar indicator names an unknown calendar system.
    UnsupportedCalendar,
    /// The input carries a time or a zone but no date.
    MissingDate,
    /// The year falls outside the supported range.
    YearRange,
    /// A date, time, or zone component is outside its valid range.
    Component,
}

/// A conversion error: an [`ErrorKind`] plus its rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochError {
    kind: ErrorKind,
    message: Box<str>,
}

impl fmt::Display for EpochError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EpochError {}

impl EpochError {
    fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message: message.into_boxed_str(),
        }
    }

    /// Returns this error's [`ErrorKind`].
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the rendered message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    // ==== Constructors, one per message shape ====

    pub(crate) fn input_length(input: &str) -> Self {
        let truncated: String = input.chars().take(32).collect();
        Self::new(
            ErrorKind::Length,
            format!(
                "Input exceeds maximum length of {} characters: '{truncated}\u{2026}'",
                crate::MAX_INPUT_LENGTH
            ),
        )
    }

    pub(crate) fn component_length(
        component: &str,
        limit: usize,
        units: &str,
        value: &str,
        input: &str,
    ) -> Self {
        Self::new(
            ErrorKind::Length,
            format!(
                "{component} component exceeds maximum length of {limit} {units}: \
                 '{value}' in input '{input}'"
            ),
        )
    }

    pub(crate) fn format(component: &str, value: &str, input: &str) -> Self {
        Self::new(
            ErrorKind::Format,
            format!("Invalid {component} '{value}' in input '{input}'"),
        )
    }

    pub(crate) fn ambiguous(pattern: &str, input: &str) -> Self {
        Self::new(
            ErrorKind::Ambiguous,
            format!("Ambiguous date format '{pattern}' in input '{input}'"),
        )
    }

    pub(crate) fn unsupported_calendar(token: &str, input: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedCalendar,
            format!("Unsupported calendar system '{token}' in input '{input}'"),
        )
    }

    pub(crate) fn missing_date(input: &str) -> Self {
        Self::new(
            ErrorKind::MissingDate,
            format!("Missing date in input '{input}'"),
        )
    }

    pub(crate) fn year_range(year: i64, input: &str) -> Self {
        Self::new(
            ErrorKind::YearRange,
            format!(
                "Year '{year}' outside supported range ({} to +{}) in input '{input}'",
                crate::MIN_YEAR,
                crate::MAX_YEAR
            ),
        )
    }

    pub(crate) fn component(component: &str, value: impl fmt::Display, input: &str) -> Self {
        Self::new(
            ErrorKind::Component,
            format!("Invalid {component} '{value}' in input '{input}'"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_shapes() {
        let err = EpochError::component("month", 13, "2024-13-01");
        assert_eq!(err.kind(), ErrorKind::Component);
        assert_eq!(err.to_string(), "Invalid month '13' in input '2024-13-01'");

        let err = EpochError::year_range(1_000_000, "1000000-01");
        assert_eq!(
            err.to_string(),
            "Year '1000000' outside supported range (-999999 to +999999) in input '1000000-01'"
        );

        let err = EpochError::ambiguous("YYYYMM", "202511");
        assert_eq!(
            err.to_string(),
            "Ambiguous date format 'YYYYMM' in input '202511'"
        );

        let err = EpochError::unsupported_calendar("mayan", "mayan:2020-01-01");
        assert_eq!(
            err.to_string(),
            "Unsupported calendar system 'mayan' in input 'mayan:2020-01-01'"
        );
    }

    #[test]
    fn length_message_truncates_input() {
        let long = "9".repeat(120);
        let err = EpochError::input_length(&long);
        assert_eq!(err.kind(), ErrorKind::Length);
        assert!(err.message().starts_with("Input exceeds maximum length of 100 characters:"));
        assert!(err.message().ends_with("\u{2026}'"));
    }
}
