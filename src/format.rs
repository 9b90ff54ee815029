//! A strftime-style formatter for date and time fields.
//!
//! Patterns are parsed once into a [`StrftimePattern`] and written through
//! [`writeable::Writeable`]. Names are always English.
//!
//! | Directive | Output                                   |
//! |-----------|------------------------------------------|
//! | `%Y`      | year, at least four digits               |
//! | `%y`      | two-digit year                           |
//! | `%m`      | two-digit month                          |
//! | `%d`      | two-digit day                            |
//! | `%e`      | space padded day                         |
//! | `%H`      | two-digit hour (24 hour clock)           |
//! | `%I`      | two-digit hour (12 hour clock)           |
//! | `%p`      | `AM` or `PM`                             |
//! | `%M`      | two-digit minute                         |
//! | `%S`      | two-digit second                         |
//! | `%L`      | three-digit millisecond                  |
//! | `%f`      | six-digit microsecond                    |
//! | `%j`      | three-digit day of the year              |
//! | `%a`/`%A` | abbreviated/full weekday name            |
//! | `%b`/`%B` | abbreviated/full month name              |
//! | `%w`      | weekday number, Sunday is `0`            |
//! | `%u`      | weekday number, Monday is `1`            |
//! | `%%`      | a literal `%`                            |
//!
//! Any other directive is written verbatim.

use alloc::{string::String, vec::Vec};
use core::fmt;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::iso::{IsoDate, IsoDateTime, IsoTime};

/// The pattern of a `DateTime` text form.
pub const DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S.%f";
/// The pattern of a `Date` text form.
pub const DATE_PATTERN: &str = "%Y-%m-%d";
/// The pattern of a `Time` or `TimeDelta` text form.
pub const TIME_PATTERN: &str = "%H:%M:%S.%f";

pub(crate) const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A single pattern directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%Y`
    Year,
    /// `%y`
    ShortYear,
    /// `%m`
    Month,
    /// `%d`
    Day,
    /// `%e`
    SpacePaddedDay,
    /// `%H`
    Hour,
    /// `%I`
    Hour12,
    /// `%p`
    Meridiem,
    /// `%M`
    Minute,
    /// `%S`
    Second,
    /// `%L`
    Millisecond,
    /// `%f`
    Microsecond,
    /// `%j`
    DayOfYear,
    /// `%a`
    ShortWeekdayName,
    /// `%A`
    WeekdayName,
    /// `%b`
    ShortMonthName,
    /// `%B`
    MonthName,
    /// `%w`
    SundayWeekday,
    /// `%u`
    MondayWeekday,
    /// `%%`
    Percent,
}

impl Directive {
    /// Returns the directive for a pattern character following `%`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let directive = match c {
            'Y' => Self::Year,
            'y' => Self::ShortYear,
            'm' => Self::Month,
            'd' => Self::Day,
            'e' => Self::SpacePaddedDay,
            'H' => Self::Hour,
            'I' => Self::Hour12,
            'p' => Self::Meridiem,
            'M' => Self::Minute,
            'S' => Self::Second,
            'L' => Self::Millisecond,
            'f' => Self::Microsecond,
            'j' => Self::DayOfYear,
            'a' => Self::ShortWeekdayName,
            'A' => Self::WeekdayName,
            'b' => Self::ShortMonthName,
            'B' => Self::MonthName,
            'w' => Self::SundayWeekday,
            'u' => Self::MondayWeekday,
            '%' => Self::Percent,
            _ => return None,
        };
        Some(directive)
    }
}

/// A parsed pattern item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternItem<'a> {
    /// Text that is written or matched verbatim.
    Literal(&'a str),
    /// A directive.
    Directive(Directive),
}

/// A strftime-style pattern parsed into items.
///
/// ```rust
/// use datetime_rs::format::{Directive, PatternItem, StrftimePattern};
///
/// let pattern = StrftimePattern::parse("%Y at %q");
/// assert_eq!(
///     pattern.items(),
///     &[
///         PatternItem::Directive(Directive::Year),
///         PatternItem::Literal(" at "),
///         PatternItem::Literal("%q"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrftimePattern<'a> {
    items: Vec<PatternItem<'a>>,
}

impl<'a> StrftimePattern<'a> {
    /// Parses a pattern. Parsing never fails: unknown directives and a
    /// trailing `%` are kept as literals.
    #[must_use]
    pub fn parse(pattern: &'a str) -> Self {
        let mut items = Vec::new();
        let mut rest = pattern;
        while !rest.is_empty() {
            let Some(index) = rest.find('%') else {
                items.push(PatternItem::Literal(rest));
                break;
            };
            if index > 0 {
                items.push(PatternItem::Literal(&rest[..index]));
            }
            let after = &rest[index + 1..];
            let Some(c) = after.chars().next() else {
                items.push(PatternItem::Literal(&rest[index..]));
                break;
            };
            let end = index + 1 + c.len_utf8();
            match Directive::from_char(c) {
                Some(directive) => items.push(PatternItem::Directive(directive)),
                None => items.push(PatternItem::Literal(&rest[index..end])),
            }
            rest = &rest[end..];
        }
        Self { items }
    }

    /// Returns the parsed items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[PatternItem<'a>] {
        &self.items
    }
}

/// Date and time fields paired with a pattern.
///
/// Fields are expected to be balanced. Unbalanced fields are written as
/// signed numbers that may exceed their usual width.
#[derive(Debug)]
pub struct FormattableDateTime<'a> {
    fields: IsoDateTime,
    pattern: &'a StrftimePattern<'a>,
}

impl<'a> FormattableDateTime<'a> {
    /// Pairs fields with a pattern.
    #[must_use]
    pub const fn new(fields: IsoDateTime, pattern: &'a StrftimePattern<'a>) -> Self {
        Self { fields, pattern }
    }

    fn write_directive<W: fmt::Write + ?Sized>(
        &self,
        directive: Directive,
        sink: &mut W,
    ) -> fmt::Result {
        let date = self.fields.date;
        match directive {
            Directive::Year => write_year(date.year, sink),
            Directive::ShortWeekdayName => sink.write_str(&weekday_name(&date)[..3]),
            Directive::WeekdayName => sink.write_str(weekday_name(&date)),
            Directive::ShortMonthName => sink.write_str(&month_name(&date)[..3]),
            Directive::MonthName => sink.write_str(month_name(&date)),
            Directive::Meridiem => sink.write_str(self.meridiem()),
            Directive::Percent => sink.write_char('%'),
            _ => match self.numeric(directive) {
                Some((value, width, pad)) => write_padded(value, width, pad, sink),
                None => Ok(()),
            },
        }
    }

    fn meridiem(&self) -> &'static str {
        if self.fields.time.hour.rem_euclid(24) < 12 {
            "AM"
        } else {
            "PM"
        }
    }

    /// Returns the value, minimum width and padding of a numeric directive.
    fn numeric(&self, directive: Directive) -> Option<(i64, usize, char)> {
        let IsoDateTime { date, time } = self.fields;
        let numeric = match directive {
            Directive::ShortYear => (i64::from(date.year.rem_euclid(100)), 2, '0'),
            Directive::Month => (i64::from(date.month), 2, '0'),
            Directive::Day => (i64::from(date.day), 2, '0'),
            Directive::SpacePaddedDay => (i64::from(date.day), 2, ' '),
            Directive::Hour => (i64::from(time.hour), 2, '0'),
            Directive::Hour12 => (hour_on_12_hour_clock(time.hour), 2, '0'),
            Directive::Minute => (i64::from(time.minute), 2, '0'),
            Directive::Second => (i64::from(time.second), 2, '0'),
            Directive::Millisecond => (i64::from(time.millisecond), 3, '0'),
            Directive::Microsecond => (i64::from(time.millisecond) * 1000, 6, '0'),
            Directive::DayOfYear => (i64::from(date.day_of_year()), 3, '0'),
            Directive::SundayWeekday => (i64::from(date.native_weekday()), 1, '0'),
            Directive::MondayWeekday => (
                i64::from(crate::utils::monday_based_weekday(date.native_weekday())) + 1,
                1,
                '0',
            ),
            _ => return None,
        };
        Some(numeric)
    }

    /// Returns the exact length written for `directive`.
    fn directive_length(&self, directive: Directive) -> usize {
        let date = self.fields.date;
        match directive {
            Directive::Year => year_length(date.year),
            Directive::ShortWeekdayName | Directive::ShortMonthName => 3,
            Directive::WeekdayName => weekday_name(&date).len(),
            Directive::MonthName => month_name(&date).len(),
            Directive::Meridiem => 2,
            Directive::Percent => 1,
            _ => self
                .numeric(directive)
                .map_or(0, |(value, width, _)| padded_length(value, width)),
        }
    }
}

impl Writeable for FormattableDateTime<'_> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        for item in self.pattern.items() {
            match item {
                PatternItem::Literal(text) => sink.write_str(text)?,
                PatternItem::Directive(directive) => self.write_directive(*directive, sink)?,
            }
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let length = self
            .pattern
            .items()
            .iter()
            .map(|item| match item {
                PatternItem::Literal(text) => text.len(),
                PatternItem::Directive(directive) => self.directive_length(*directive),
            })
            .sum();
        LengthHint::exact(length)
    }
}

impl_display_with_writeable!(FormattableDateTime<'_>);

/// Formats balanced fields with a pattern.
///
/// ```rust
/// use datetime_rs::format::format_fields;
/// use datetime_rs::iso::{IsoDate, IsoDateTime, IsoTime};
///
/// let fields = IsoDateTime::new_unchecked(
///     IsoDate::new_unchecked(2020, 3, 2),
///     IsoTime::new_unchecked(17, 6, 7, 8),
/// );
/// assert_eq!(format_fields(&fields, "%a %d %b %Y, %I:%M %p"), "Mon 02 Mar 2020, 05:06 PM");
/// ```
#[must_use]
pub fn format_fields(fields: &IsoDateTime, pattern: &str) -> String {
    let pattern = StrftimePattern::parse(pattern);
    FormattableDateTime::new(*fields, &pattern)
        .write_to_string()
        .into_owned()
}

/// A balanced time of day in the fixed `HH:MM:SS.ffffff` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl From<IsoTime> for FormattableTime {
    fn from(value: IsoTime) -> Self {
        Self {
            hour: value.hour as u8,
            minute: value.minute as u8,
            second: value.second as u8,
            millisecond: value.millisecond as u16,
        }
    }
}

impl Writeable for FormattableTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        sink.write_char('.')?;
        write_padded(i64::from(self.millisecond) * 1000, 6, '0', sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(15)
    }
}

/// A date in the fixed `YYYY-MM-DD` form.
///
/// Unbalanced months and days are written as signed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattableDate(pub i32, pub i32, pub i32);

impl From<IsoDate> for FormattableDate {
    fn from(value: IsoDate) -> Self {
        Self(value.year, value.month, value.day)
    }
}

impl Writeable for FormattableDate {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded(i64::from(self.1), 2, '0', sink)?;
        sink.write_char('-')?;
        write_padded(i64::from(self.2), 2, '0', sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(
            year_length(self.0)
                + padded_length(i64::from(self.1), 2)
                + padded_length(i64::from(self.2), 2)
                + 2,
        )
    }
}

impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableDate);

fn hour_on_12_hour_clock(hour: i32) -> i64 {
    match hour.rem_euclid(12) {
        0 => 12,
        h => i64::from(h),
    }
}

fn weekday_name(date: &IsoDate) -> &'static str {
    WEEKDAY_NAMES[usize::from(date.native_weekday())]
}

fn month_name(date: &IsoDate) -> &'static str {
    MONTH_NAMES[(date.month - 1).clamp(0, 11) as usize]
}

fn write_padded_u8<W: fmt::Write + ?Sized>(num: u8, sink: &mut W) -> fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn digit_count(num: u64) -> usize {
    num.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Writes `num` padded to `width` digits, preceded by `-` when negative.
fn write_padded<W: fmt::Write + ?Sized>(
    num: i64,
    width: usize,
    pad: char,
    sink: &mut W,
) -> fmt::Result {
    if num < 0 {
        sink.write_char('-')?;
    }
    let magnitude = num.unsigned_abs();
    for _ in digit_count(magnitude)..width {
        sink.write_char(pad)?;
    }
    magnitude.write_to(sink)
}

fn padded_length(num: i64, width: usize) -> usize {
    usize::from(num < 0) + digit_count(num.unsigned_abs()).max(width)
}

fn write_year<W: fmt::Write + ?Sized>(year: i32, sink: &mut W) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write_padded(i64::from(year), 4, '0', sink)
    } else {
        sink.write_char(if year < 0 { '-' } else { '+' })?;
        write_padded(i64::from(year.unsigned_abs()), 6, '0', sink)
    }
}

fn year_length(year: i32) -> usize {
    if (0..=9999).contains(&year) {
        4
    } else {
        1 + padded_length(i64::from(year.unsigned_abs()), 6)
    }
}
