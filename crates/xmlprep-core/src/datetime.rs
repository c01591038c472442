//! Best-effort date/time normalization.
//!
//! Values are matched against a fixed, ordered list of layouts written in
//! reference-date notation (`01-02-06 15:04:05` stands for month, day,
//! two-digit year, hour, minute, second). The first layout that parses the
//! whole value wins and the result is rendered as `YYYY-MM-DD HH:MM:SS`.
//! Values that match no layout are returned unchanged.
//!
//! # Layout fields
//!
//! | Token | Meaning                         | Width       |
//! |-------|---------------------------------|-------------|
//! | `01`  | month 01-12                     | exactly 2   |
//! | `1`   | month 1-12                      | 1 or 2      |
//! | `02`  | day of month                    | exactly 2   |
//! | `06`  | year, `69`-`99` => 19xx else 20xx | exactly 2 |
//! | `15`  | hour 0-23                       | 1 or 2      |
//! | `04`  | minute 00-59                    | exactly 2   |
//! | `05`  | second 00-59                    | exactly 2   |
//!
//! A space in a layout matches one or more spaces. A fractional second
//! (`.123` or `,123`) directly after the seconds field is accepted and
//! dropped.
//!
//! Normalizing is not idempotent in the sense of re-recognizing its own
//! output: the canonical layout is not a candidate, so canonical values pass
//! through unchanged.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

/// Candidate layouts, tried in this order.
pub const CANDIDATE_LAYOUTS: [&str; 9] = [
    "01-02-06",
    "01-02-06 15:04",
    "01-02-06 15:04:05",
    "1/02/06",
    "1/02/06 15:04",
    "1/02/06 15:04:05",
    "01/02/06",
    "01/02/06 15:04",
    "01/02/06 15:04:05",
];

/// `chrono` format string of the canonical timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Two-digit years at or above this pivot belong to the 1900s.
const CENTURY_PIVOT: u32 = 69;

/// A value recognized by one of the candidate layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    /// The layout that matched.
    pub layout: &'static str,
    /// The parsed instant (no timezone).
    pub datetime: NaiveDateTime,
}

impl DateMatch {
    /// Renders the match in the canonical layout.
    pub fn canonical(&self) -> String {
        self.datetime.format(CANONICAL_FORMAT).to_string()
    }
}

/// Normalizes `value` to `YYYY-MM-DD HH:MM:SS`, or returns it unchanged.
///
/// ```
/// use xmlprep_core::normalize_datetime;
///
/// assert_eq!(normalize_datetime("12-25-20 12:34:56"), "2020-12-25 12:34:56");
/// assert_eq!(normalize_datetime("invalid date"), "invalid date");
/// ```
pub fn normalize_datetime(value: &str) -> String {
    match match_datetime(value) {
        Some(found) => found.canonical(),
        None => value.to_string(),
    }
}

/// Returns the first candidate layout that parses `value`.
pub fn match_datetime(value: &str) -> Option<DateMatch> {
    CANDIDATE_LAYOUTS.iter().copied().find_map(|layout| {
        let datetime = parse_with_layout(layout, value)?;
        trace!(layout, "date layout matched");
        Some(DateMatch { layout, datetime })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ZeroMonth,
    Month,
    ZeroDay,
    Year,
    Hour,
    ZeroMinute,
    ZeroSecond,
}

impl Field {
    fn fixed_width(self) -> bool {
        !matches!(self, Self::Month | Self::Hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Field(Field),
    Literal(char),
}

/// Splits a layout into field and literal tokens.
fn tokenize(layout: &str) -> Vec<Token> {
    const FIELDS: [(&str, Field); 7] = [
        ("01", Field::ZeroMonth),
        ("02", Field::ZeroDay),
        ("06", Field::Year),
        ("15", Field::Hour),
        ("04", Field::ZeroMinute),
        ("05", Field::ZeroSecond),
        ("1", Field::Month),
    ];

    let mut tokens = Vec::new();
    let mut rest = layout;
    'outer: while let Some(ch) = rest.chars().next() {
        for (pattern, field) in FIELDS {
            if let Some(tail) = rest.strip_prefix(pattern) {
                tokens.push(Token::Field(field));
                rest = tail;
                continue 'outer;
            }
        }
        tokens.push(Token::Literal(ch));
        rest = &rest[ch.len_utf8()..];
    }
    tokens
}

#[derive(Debug, Default)]
struct Components {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: u32,
    minute: u32,
    second: u32,
}

impl Components {
    fn set(&mut self, field: Field, value: u32) -> Option<()> {
        match field {
            Field::ZeroMonth | Field::Month => {
                if !(1..=12).contains(&value) {
                    return None;
                }
                self.month = Some(value);
            }
            Field::ZeroDay => {
                if !(1..=31).contains(&value) {
                    return None;
                }
                self.day = Some(value);
            }
            Field::Year => {
                let century = if value >= CENTURY_PIVOT { 1900 } else { 2000 };
                self.year = Some(century + value as i32);
            }
            Field::Hour => {
                if value > 23 {
                    return None;
                }
                self.hour = value;
            }
            Field::ZeroMinute => {
                if value > 59 {
                    return None;
                }
                self.minute = value;
            }
            Field::ZeroSecond => {
                if value > 59 {
                    return None;
                }
                self.second = value;
            }
        }
        Some(())
    }

    fn into_datetime(self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)?;
        date.and_hms_opt(self.hour, self.minute, self.second)
    }
}

/// Parses `value` against a single layout; the whole value must be consumed.
fn parse_with_layout(layout: &str, value: &str) -> Option<NaiveDateTime> {
    let mut rest = value;
    let mut components = Components::default();

    for token in tokenize(layout) {
        match token {
            Token::Literal(' ') => {
                let trimmed = rest.trim_start_matches(' ');
                if trimmed.len() == rest.len() {
                    return None;
                }
                rest = trimmed;
            }
            Token::Literal(ch) => rest = rest.strip_prefix(ch)?,
            Token::Field(field) => {
                let (number, tail) = take_number(rest, field)?;
                components.set(field, number)?;
                rest = tail;
                if field == Field::ZeroSecond {
                    rest = skip_fraction(rest);
                }
            }
        }
    }

    if !rest.is_empty() {
        return None;
    }
    components.into_datetime()
}

/// Reads one or two leading ASCII digits; fixed-width fields need two.
fn take_number(input: &str, field: Field) -> Option<(u32, &str)> {
    let bytes = input.as_bytes();
    let first = digit(bytes.first())?;
    match digit(bytes.get(1)) {
        Some(second) => Some((first * 10 + second, &input[2..])),
        None if field.fixed_width() => None,
        None => Some((first, &input[1..])),
    }
}

fn digit(byte: Option<&u8>) -> Option<u32> {
    byte.filter(|b| b.is_ascii_digit())
        .map(|b| u32::from(b - b'0'))
}

/// Skips a `.digits` or `,digits` suffix.
fn skip_fraction(input: &str) -> &str {
    let bytes = input.as_bytes();
    let has_fraction = bytes.len() >= 2
        && matches!(bytes[0], b'.' | b',')
        && bytes[1].is_ascii_digit();
    if !has_fraction {
        return input;
    }
    let end = 1 + bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    &input[end..]
}
