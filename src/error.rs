//! This module implements `DateTimeError`.

use alloc::{
    borrow::Cow,
    boxed::Box,
    string::{String, ToString},
};
use core::fmt;

/// `DateTimeError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError
    Type,
    /// RangeError
    Range,
    /// ValueError
    Value,
    /// Unexpected internal state.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Value => "ValueError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The text and pattern of a failed `strptime` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMismatch {
    text: String,
    pattern: String,
}

impl FormatMismatch {
    /// Returns the text that failed to parse.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the pattern the text was parsed against.
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for FormatMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time data {:?} does not match format {:?}",
            self.text, self.pattern
        )
    }
}

/// The error type for `datetime_rs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    mismatch: Option<Box<FormatMismatch>>,
}

impl DateTimeError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
            mismatch: None,
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create a value error.
    #[inline]
    #[must_use]
    pub const fn value() -> Self {
        Self::new(ErrorKind::Value)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub(crate) const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create a value error for text that does not conform to a `strptime` pattern.
    #[must_use]
    pub fn format_mismatch(text: &str, pattern: &str) -> Self {
        let mismatch = FormatMismatch {
            text: text.to_string(),
            pattern: pattern.to_string(),
        };
        Self {
            kind: ErrorKind::Value,
            msg: Cow::Owned(mismatch.to_string()),
            mismatch: Some(Box::new(mismatch)),
        }
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add a predefined message to the error.
    #[inline]
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.to_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the offending text and pattern when this error came from `strptime`.
    #[inline]
    #[must_use]
    pub fn format_mismatch_details(&self) -> Option<&FormatMismatch> {
        self.mismatch.as_deref()
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for DateTimeError {}

/// Frequently used error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorMessage {
    InstantOutOfRange,
    DateTimeOutOfRange,
    DateOutOfRange,
    ArithmeticOutOfRange,
    MissingYearOrMonth,
    SystemTimeBeforeEpoch,
    SystemTimeZoneUnavailable,
}

impl ErrorMessage {
    pub(crate) const fn to_str(self) -> &'static str {
        match self {
            Self::InstantOutOfRange => "Instant is not within a valid epoch range.",
            Self::DateTimeOutOfRange => "DateTime fields describe an instant outside the valid range.",
            Self::DateOutOfRange => "Date fields carry into a year outside the supported range.",
            Self::ArithmeticOutOfRange => "Arithmetic result is outside the valid range.",
            Self::MissingYearOrMonth => "year and month are required to construct a DateTime.",
            Self::SystemTimeBeforeEpoch => "Error fetching system time",
            Self::SystemTimeZoneUnavailable => "Error fetching system time zone",
        }
    }
}
