//! Date formatting for derived item fields.
//!
//! The processor treats date patterns as opaque strings and hands them to a
//! [`DateFormatter`] together with the raw timestamp. [`PatternFormatter`]
//! is the default implementation, rendering moment-style component tokens
//! (`MMMM Do YYYY`, `HH:mm:ss`) through chrono.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike,
};

/// Error type for date formatting.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// The timestamp string could not be parsed.
    #[error("unparseable timestamp: {value:?}")]
    Parse {
        /// The raw value as it appeared on the item.
        value: String,
    },
}

/// Date-formatting capability consumed by the processor.
///
/// `pattern` syntax is defined by the implementation; the processor passes
/// patterns through unchanged and stores whatever comes back.
pub trait DateFormatter: Send + Sync {
    /// Render `timestamp` according to `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] if the timestamp cannot be parsed.
    fn format(&self, timestamp: &str, pattern: &str) -> Result<String, DateError>;
}

/// Moment-style pattern formatter backed by chrono.
///
/// Supported tokens: years `YYYY`/`YY`, months `MMMM`/`MMM`/`MM`/`M`, days
/// of month `DD`/`Do`/`D` (`Do` renders the ordinal form: `1st`, `2nd`,
/// `3rd`, ...), weekdays `dddd`/`ddd`, hours `HH`/`H`/`hh`/`h`, minutes
/// `mm`/`m`, seconds `ss`/`s`, meridiem `A`/`a`. Text in square brackets is
/// emitted verbatim; any other character passes through unchanged.
///
/// Timestamps parse as RFC 3339, with lenient fallbacks for naive
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, and `YYYY-MM-DD` forms.
/// Values are converted to local time before rendering;
/// [`PatternFormatter::with_fixed_offset`] pins a specific UTC offset
/// instead, which keeps output stable across environments.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternFormatter {
    zone: Zone,
}

#[derive(Clone, Copy, Debug, Default)]
enum Zone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl PatternFormatter {
    /// Formatter rendering in the local time zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter rendering in a fixed UTC offset.
    #[must_use]
    pub fn with_fixed_offset(offset: FixedOffset) -> Self {
        Self {
            zone: Zone::Fixed(offset),
        }
    }

    fn parse(&self, value: &str) -> Result<DateTime<FixedOffset>, DateError> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Ok(self.rezone(parsed));
        }
        Self::parse_naive(value)
            .and_then(|naive| self.localize(naive))
            .ok_or_else(|| DateError::Parse {
                value: value.to_owned(),
            })
    }

    fn parse_naive(value: &str) -> Option<NaiveDateTime> {
        for layout in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(value, layout) {
                return Some(parsed);
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    fn rezone(&self, value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self.zone {
            Zone::Local => value.with_timezone(&Local).fixed_offset(),
            Zone::Fixed(offset) => value.with_timezone(&offset),
        }
    }

    fn localize(&self, value: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self.zone {
            Zone::Local => Local
                .from_local_datetime(&value)
                .earliest()
                .map(|at| at.fixed_offset()),
            Zone::Fixed(offset) => offset.from_local_datetime(&value).single(),
        }
    }
}

impl DateFormatter for PatternFormatter {
    fn format(&self, timestamp: &str, pattern: &str) -> Result<String, DateError> {
        let at = self.parse(timestamp)?;
        Ok(render(&at, pattern))
    }
}

/// Render a pattern against a parsed timestamp.
fn render(at: &DateTime<FixedOffset>, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        // Bracketed text is emitted verbatim; an unclosed bracket falls
        // through and is copied like any other character.
        if chars[i] == '[' {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ']') {
                out.extend(chars[i + 1..i + 1 + offset].iter());
                i += offset + 2;
                continue;
            }
        }
        // "Do" is the one token that is not a run of a single character.
        if chars[i] == 'D' && chars.get(i + 1) == Some(&'o') {
            out.push_str(&ordinal(at.day()));
            i += 2;
            continue;
        }
        let run = chars[i + 1..].iter().take_while(|&&c| c == chars[i]).count() + 1;
        i += emit(&mut out, at, chars[i], run);
    }
    out
}

/// Emit one token (or a literal run), returning how many pattern
/// characters were consumed.
fn emit(out: &mut String, at: &DateTime<FixedOffset>, token: char, run: usize) -> usize {
    match (token, run) {
        ('Y', 4..) => {
            push_fmt(out, at, "%Y");
            4
        }
        ('Y', 2..) => {
            push_fmt(out, at, "%y");
            2
        }
        ('Y', _) => {
            push_number(out, at.year());
            1
        }
        ('M', 4..) => {
            push_fmt(out, at, "%B");
            4
        }
        ('M', 3) => {
            push_fmt(out, at, "%b");
            3
        }
        ('M', 2) => {
            push_fmt(out, at, "%m");
            2
        }
        ('M', _) => {
            push_number(out, at.month());
            1
        }
        ('D', 2..) => {
            push_fmt(out, at, "%d");
            2
        }
        ('D', _) => {
            push_number(out, at.day());
            1
        }
        ('d', 4..) => {
            push_fmt(out, at, "%A");
            4
        }
        ('d', 3) => {
            push_fmt(out, at, "%a");
            3
        }
        ('d', _) => {
            push_number(out, at.weekday().num_days_from_sunday());
            1
        }
        ('H', 2..) => {
            push_fmt(out, at, "%H");
            2
        }
        ('H', _) => {
            push_number(out, at.hour());
            1
        }
        ('h', 2..) => {
            push_fmt(out, at, "%I");
            2
        }
        ('h', _) => {
            push_number(out, at.hour12().1);
            1
        }
        ('m', 2..) => {
            push_fmt(out, at, "%M");
            2
        }
        ('m', _) => {
            push_number(out, at.minute());
            1
        }
        ('s', 2..) => {
            push_fmt(out, at, "%S");
            2
        }
        ('s', _) => {
            push_number(out, at.second());
            1
        }
        ('A', _) => {
            push_fmt(out, at, "%p");
            1
        }
        ('a', _) => {
            push_fmt(out, at, "%P");
            1
        }
        _ => {
            for _ in 0..run {
                out.push(token);
            }
            run
        }
    }
}

fn push_fmt(out: &mut String, at: &DateTime<FixedOffset>, spec: &str) {
    out.push_str(&at.format(spec).to_string());
}

fn push_number(out: &mut String, value: impl std::fmt::Display) {
    out.push_str(&value.to_string());
}

/// Day of month with its ordinal suffix (`1st`, `2nd`, `3rd`, `4th`, with
/// the `11th`-`13th` exceptions).
fn ordinal(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix}")
}
