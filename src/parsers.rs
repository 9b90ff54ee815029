//! A strptime-style parser for date and time text.
//!
//! The parser accepts the directives of [`crate::format`]. `%a`, `%A`, `%w`
//! and `%u` are matched and then ignored. `%j` sets the day of the year.
//! Whitespace in a pattern matches zero or more whitespace characters in the
//! text, and the whole text must be consumed.

use crate::{
    format::{Directive, PatternItem, StrftimePattern, MONTH_NAMES, WEEKDAY_NAMES},
    iso::{IsoDate, IsoDateTime, IsoTime},
};

/// The year used when a pattern has no year directive.
pub const DEFAULT_YEAR: i32 = 1900;

/// Fields collected while parsing.
#[derive(Debug, Default, Clone, Copy)]
struct ParsedRecord {
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
    day_of_year: Option<i32>,
    hour: Option<i32>,
    minute: Option<i32>,
    second: Option<i32>,
    millisecond: Option<i32>,
    pm: Option<bool>,
}

impl ParsedRecord {
    fn into_iso(self) -> IsoDateTime {
        let year = self.year.unwrap_or(DEFAULT_YEAR);
        let date = match (self.month, self.day, self.day_of_year) {
            (None, None, Some(day_of_year)) => IsoDate::new_unchecked(year, 1, day_of_year),
            (month, day, _) => IsoDate::new_unchecked(year, month.unwrap_or(1), day.unwrap_or(1)),
        };
        let mut hour = self.hour.unwrap_or_default();
        if let Some(pm) = self.pm {
            hour = hour % 12 + if pm { 12 } else { 0 };
        }
        let time = IsoTime::new_unchecked(
            hour,
            self.minute.unwrap_or_default(),
            self.second.unwrap_or_default(),
            self.millisecond.unwrap_or_default(),
        );
        IsoDateTime::new_unchecked(date, time)
    }
}

/// A byte cursor over the parsed text.
struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.advance(c.len_utf8());
        }
    }

    fn eat_char(&mut self, expected: char) -> Option<()> {
        (self.peek()? == expected).then(|| self.advance(expected.len_utf8()))
    }

    /// Reads one to `max` ASCII digits.
    fn digits(&mut self, max: usize) -> Option<(i32, usize)> {
        let count = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if count == 0 {
            return None;
        }
        let value = self.rest()[..count]
            .bytes()
            .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));
        self.advance(count);
        Some((value, count))
    }

    fn number(&mut self, max: usize) -> Option<i32> {
        self.digits(max).map(|(value, _)| value)
    }

    /// Matches the longest of the provided names, ignoring ASCII case, and
    /// returns its index.
    fn name(&mut self, names: &[&str], abbreviated: bool) -> Option<usize> {
        let rest = self.rest();
        let (index, len) = names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let candidate = if abbreviated { &name[..3] } else { name };
                rest.get(..candidate.len())
                    .filter(|prefix| prefix.eq_ignore_ascii_case(candidate))
                    .map(|_| (index, candidate.len()))
            })
            .max_by_key(|(_, len)| *len)?;
        self.advance(len);
        Some(index)
    }
}

fn parse_literal(cursor: &mut Cursor<'_>, literal: &str) -> Option<()> {
    for c in literal.chars() {
        if c.is_whitespace() {
            cursor.skip_whitespace();
        } else {
            cursor.eat_char(c)?;
        }
    }
    Some(())
}

fn parse_directive(
    cursor: &mut Cursor<'_>,
    directive: Directive,
    record: &mut ParsedRecord,
) -> Option<()> {
    match directive {
        Directive::Year => {
            let sign = match cursor.peek() {
                Some('-') => Some(-1),
                Some('+') => Some(1),
                _ => None,
            };
            if sign.is_some() {
                cursor.advance(1);
            }
            let max = if sign.is_some() { 6 } else { 4 };
            record.year = Some(cursor.number(max)? * sign.unwrap_or(1));
        }
        Directive::ShortYear => {
            let year = cursor.number(2)?;
            record.year = Some(year + if year < 69 { 2000 } else { 1900 });
        }
        Directive::Month => record.month = Some(cursor.number(2)?),
        Directive::Day => record.day = Some(cursor.number(2)?),
        Directive::SpacePaddedDay => {
            cursor.skip_whitespace();
            record.day = Some(cursor.number(2)?);
        }
        Directive::Hour | Directive::Hour12 => record.hour = Some(cursor.number(2)?),
        Directive::Meridiem => {
            let index = cursor.name(&["AM", "PM"], false)?;
            record.pm = Some(index == 1);
        }
        Directive::Minute => record.minute = Some(cursor.number(2)?),
        Directive::Second => record.second = Some(cursor.number(2)?),
        Directive::Millisecond => record.millisecond = Some(cursor.number(3)?),
        Directive::Microsecond => {
            let (value, count) = cursor.digits(6)?;
            let microseconds = value * 10i32.pow(6 - count as u32);
            record.millisecond = Some(microseconds / 1000);
        }
        Directive::DayOfYear => record.day_of_year = Some(cursor.number(3)?),
        Directive::ShortWeekdayName | Directive::WeekdayName => {
            cursor
                .name(&WEEKDAY_NAMES, false)
                .or_else(|| cursor.name(&WEEKDAY_NAMES, true))?;
        }
        Directive::ShortMonthName | Directive::MonthName => {
            let index = cursor
                .name(&MONTH_NAMES, false)
                .or_else(|| cursor.name(&MONTH_NAMES, true))?;
            record.month = Some(index as i32 + 1);
        }
        Directive::SundayWeekday => {
            cursor.number(1).filter(|n| (0..=6).contains(n))?;
        }
        Directive::MondayWeekday => {
            cursor.number(1).filter(|n| (1..=7).contains(n))?;
        }
        Directive::Percent => cursor.eat_char('%')?,
    }
    Some(())
}

/// Parses `text` against a strftime-style `pattern`.
///
/// Returns `None` when the text does not match. An absent year, month, or
/// day defaults to `1900-01-01` and absent time fields default to zero.
/// Parsed values are not range checked.
///
/// ```rust
/// use datetime_rs::parsers::strptime;
///
/// let fields = strptime("2020-04-12 at 5:06 pm", "%Y-%m-%d at %I:%M %p").unwrap();
/// assert_eq!((fields.date.year, fields.date.month, fields.date.day), (2020, 4, 12));
/// assert_eq!((fields.time.hour, fields.time.minute), (17, 6));
///
/// assert!(strptime("bogus", "%Y-%m-%d").is_none());
/// ```
#[must_use]
pub fn strptime(text: &str, pattern: &str) -> Option<IsoDateTime> {
    let pattern = StrftimePattern::parse(pattern);
    let mut cursor = Cursor::new(text);
    let mut record = ParsedRecord::default();
    for item in pattern.items() {
        match item {
            PatternItem::Literal(literal) => parse_literal(&mut cursor, literal)?,
            PatternItem::Directive(directive) => {
                parse_directive(&mut cursor, *directive, &mut record)?;
            }
        }
    }
    cursor.is_done().then(|| record.into_iso())
}

#[cfg(test)]
mod tests {
    use super::strptime;
    use crate::iso::{IsoDate, IsoDateTime, IsoTime};

    fn fields(y: i32, mo: i32, d: i32, h: i32, mi: i32, s: i32, ms: i32) -> IsoDateTime {
        IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(y, mo, d),
            IsoTime::new_unchecked(h, mi, s, ms),
        )
    }

    #[test]
    fn default_datetime_pattern() {
        assert_eq!(
            strptime("2020-03-02 05:06:07.008000", "%Y-%m-%d %H:%M:%S.%f"),
            Some(fields(2020, 3, 2, 5, 6, 7, 8))
        );
        assert_eq!(
            strptime("2020-04-12", "%Y-%m-%d"),
            Some(fields(2020, 4, 12, 0, 0, 0, 0))
        );
    }

    #[test]
    fn defaults_to_1900() {
        assert_eq!(
            strptime("13:45", "%H:%M"),
            Some(fields(1900, 1, 1, 13, 45, 0, 0))
        );
    }

    #[test]
    fn mismatches() {
        assert_eq!(strptime("bogus", "%Y-%m-%d"), None);
        assert_eq!(strptime("2020-04", "%Y-%m-%d"), None);
        // Trailing text is a mismatch.
        assert_eq!(strptime("2020-04-12 ", "%Y-%m-%d"), None);
        assert_eq!(strptime("2020/04/12", "%Y-%m-%d"), None);
        assert_eq!(strptime("", "%Y"), None);
    }

    #[test]
    fn whitespace_is_flexible() {
        assert_eq!(
            strptime("2020-04-12T10", "%Y-%m-%dT%H"),
            Some(fields(2020, 4, 12, 10, 0, 0, 0))
        );
        assert_eq!(
            strptime("12   Apr 2020", "%d %b %Y"),
            Some(fields(2020, 4, 12, 0, 0, 0, 0))
        );
        assert_eq!(
            strptime("12Apr2020", "%d %b %Y"),
            Some(fields(2020, 4, 12, 0, 0, 0, 0))
        );
    }

    #[test]
    fn names_and_ignored_directives() {
        assert_eq!(
            strptime("Sunday, 12 april 2020 (7)", "%A, %d %B %Y (%u)"),
            Some(fields(2020, 4, 12, 0, 0, 0, 0))
        );
        assert_eq!(
            strptime("Sun Sep 6", "%a %b %e"),
            Some(fields(1900, 9, 6, 0, 0, 0, 0))
        );
        assert_eq!(strptime("8", "%w"), None);
    }

    #[test]
    fn meridiem() {
        assert_eq!(
            strptime("12:30 AM", "%I:%M %p"),
            Some(fields(1900, 1, 1, 0, 30, 0, 0))
        );
        assert_eq!(
            strptime("12:30 PM", "%I:%M %p"),
            Some(fields(1900, 1, 1, 12, 30, 0, 0))
        );
        assert_eq!(
            strptime("1:30 pm", "%I:%M %p"),
            Some(fields(1900, 1, 1, 13, 30, 0, 0))
        );
    }

    #[test]
    fn fractions_and_ordinals() {
        assert_eq!(
            strptime("05.5", "%S.%f"),
            Some(fields(1900, 1, 1, 0, 0, 5, 500))
        );
        assert_eq!(
            strptime("05.042", "%S.%L"),
            Some(fields(1900, 1, 1, 0, 0, 5, 42))
        );
        assert_eq!(
            strptime("2020 061", "%Y %j"),
            Some(fields(2020, 1, 61, 0, 0, 0, 0))
        );
    }

    #[test]
    fn years() {
        assert_eq!(
            strptime("69-01-01", "%y-%m-%d").map(|f| f.date.year),
            Some(1969)
        );
        assert_eq!(
            strptime("68-01-01", "%y-%m-%d").map(|f| f.date.year),
            Some(2068)
        );
        assert_eq!(strptime("-0044", "%Y").map(|f| f.date.year), Some(-44));
        assert_eq!(
            strptime("20200412", "%Y%m%d"),
            Some(fields(2020, 4, 12, 0, 0, 0, 0))
        );
        assert_eq!(strptime("100%", "%Y%%").map(|f| f.date.year), Some(100));
    }
}
