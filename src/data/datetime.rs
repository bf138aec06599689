// src/data/datetime.rs

//! Compile a date-format template into artifacts for finding and parsing
//! timestamps within log lines.
//!
//! A template is written as the _reference date_, the same idea popularized
//! by Go's `time` package: the template `"02/Jan/2006:15:04:05.000"`
//! describes a timestamp by showing how the fixed example instant
//! 2006-01-02 15:04:05 (a Monday) would appear in the log. Compilation
//! requires:
//!
//! 1. tokenizing the template, longest-token-first, into recognized field
//!    tokens and literal runs (see [`tokenize_format`] and [`FORMAT_TOKENS`])
//! 2. deriving a [`regex::Regex`] that locates a timestamp substring on a
//!    log line, and a chrono [`strftime`] pattern that parses the located
//!    substring
//! 3. self-validating the template: the template string, fed back through
//!    its own parser as if it were a timestamp, must reproduce the canonical
//!    reference instant (see [`TimeFormat::new`])
//!
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html

use std::fmt;

use ::chrono::{NaiveDate, NaiveDateTime};
use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::{defn, defo, defx};

use crate::common::{EpochSecond, Result, SparklogError};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// format templates and the token vocabulary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// a _Year_ in a date
pub type Year = i32;

/// the common proxy/web-server log date format; the program default
pub const APACHE_COMMON_LOG_DATE_FORMAT: &str = "02/Jan/2006:15:04:05.000";

/// the full reference date written out as a template (ANSIC layout)
pub const CANONICAL_DATE_FORMAT: &str = "Mon Jan 2 15:04:05 2006";

/// the year of the canonical reference instant; also fills in parsed
/// datetimes from templates that carry no year field
pub const CANONICAL_YEAR: Year = 2006;

lazy_static! {
    /// The canonical reference instant, 2006-01-02 15:04:05.
    ///
    /// Every valid template, parsed as its own example timestamp, must
    /// produce exactly this instant.
    pub static ref CANONICAL_DATETIME: NaiveDateTime = NaiveDate::from_ymd_opt(2006, 1, 2)
        .unwrap()
        .and_hms_opt(15, 4, 5)
        .unwrap();
}

/// the datetime field a format token carries
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fractional,
    Weekday,
    Meridiem,
}

/// one recognized token of the template vocabulary
#[derive(Debug)]
pub struct FormatToken {
    /// the token as written in a template
    pub text: &'static str,
    /// chrono `strftime` equivalent
    pub strftime: &'static str,
    /// regular expression snippet matching one instance of the field
    pub pattern: &'static str,
    /// which field the token carries
    pub field: FormatField,
}

const fn ft(
    text: &'static str,
    strftime: &'static str,
    pattern: &'static str,
    field: FormatField,
) -> FormatToken {
    FormatToken {
        text,
        strftime,
        pattern,
        field,
    }
}

/// The token vocabulary, ordered longest-token-first so the tokenizer never
/// matches a short token inside a longer one (`"2006"` must win over `"2"`
/// followed by `"06"`). Anything not listed here is a literal.
pub const FORMAT_TOKENS: [FormatToken; 22] = [
    ft(".000000000", "%.9f", r"\.\d{9}", FormatField::Fractional),
    ft(".000000", "%.6f", r"\.\d{6}", FormatField::Fractional),
    ft("January", "%B", "[A-Za-z]{3,9}", FormatField::Month),
    ft("Monday", "%A", "[A-Za-z]{6,9}", FormatField::Weekday),
    ft(".000", "%.3f", r"\.\d{3}", FormatField::Fractional),
    ft("2006", "%Y", r"\d{4}", FormatField::Year),
    ft("Jan", "%b", "[A-Za-z]{3}", FormatField::Month),
    ft("Mon", "%a", "[A-Za-z]{3}", FormatField::Weekday),
    ft("01", "%m", r"\d{2}", FormatField::Month),
    ft("02", "%d", r"\d{2}", FormatField::Day),
    ft("03", "%I", r"\d{2}", FormatField::Hour),
    ft("04", "%M", r"\d{2}", FormatField::Minute),
    ft("05", "%S", r"\d{2}", FormatField::Second),
    ft("06", "%y", r"\d{2}", FormatField::Year),
    ft("15", "%H", r"\d{2}", FormatField::Hour),
    ft("PM", "%p", "(?:AM|PM)", FormatField::Meridiem),
    ft("pm", "%P", "(?:am|pm)", FormatField::Meridiem),
    ft("1", "%-m", r"\d{1,2}", FormatField::Month),
    ft("2", "%-d", r"\d{1,2}", FormatField::Day),
    ft("3", "%-I", r"\d{1,2}", FormatField::Hour),
    ft("4", "%-M", r"\d{1,2}", FormatField::Minute),
    ft("5", "%-S", r"\d{1,2}", FormatField::Second),
];

/// one segment of a tokenized template
#[derive(Debug)]
pub enum FormatSegment<'a> {
    /// a recognized token of [`FORMAT_TOKENS`]
    Token(&'static FormatToken),
    /// a run of template characters requiring an exact character match
    Literal(&'a str),
}

/// Tokenize a template into field tokens and literal runs.
///
/// At each position the longest matching token is taken; characters not
/// starting any token are accumulated into literal runs.
pub fn tokenize_format(template: &str) -> Vec<FormatSegment<'_>> {
    let mut segments: Vec<FormatSegment> = Vec::new();
    let mut at: usize = 0;
    let mut literal_start: usize = 0;
    'scan: while at < template.len() {
        for token in FORMAT_TOKENS.iter() {
            if template[at..].starts_with(token.text) {
                if literal_start < at {
                    segments.push(FormatSegment::Literal(&template[literal_start..at]));
                }
                segments.push(FormatSegment::Token(token));
                at += token.text.len();
                literal_start = at;
                continue 'scan;
            }
        }
        // not a token; the character joins the pending literal run
        at += template[at..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
    }
    if literal_start < template.len() {
        segments.push(FormatSegment::Literal(&template[literal_start..]));
    }

    segments
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TimeFormat
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A compiled and validated date-format template.
///
/// Construction with [`TimeFormat::new`] is the only way to get one, so a
/// `TimeFormat` in hand is always valid. Immutable thereafter.
pub struct TimeFormat {
    /// the template as the user passed it
    template: String,
    /// locates a timestamp substring within a log line
    regex: Regex,
    /// chrono `strftime` pattern parsing what `regex` matched
    strftime: String,
    /// `strftime` with a year field prepended; `Some` only for templates
    /// carrying no year, where the canonical year is filled in
    strftime_fill_year: Option<String>,
}

impl fmt::Debug for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeFormat")
            .field("template", &self.template)
            .field("regex", &self.regex.as_str())
            .field("strftime", &self.strftime)
            .finish()
    }
}

impl TimeFormat {
    /// Compile and self-validate a date-format template.
    ///
    /// Validation feeds the template string back through its own parser as
    /// if it were a literal timestamp; the result must equal the canonical
    /// reference instant. This indirectly requires the template to carry at
    /// least a day and a time of day. A template without a year is accepted
    /// (classic syslog, `"Jan 2 15:04:05"`); the canonical year is filled in
    /// at parse time, which leaves relative binning unaffected.
    pub fn new(template: &str) -> Result<TimeFormat> {
        defn!("({:?})", template);
        let segments = tokenize_format(template);
        let mut pattern = String::with_capacity(template.len() * 4);
        let mut strftime = String::with_capacity(template.len());
        let mut has_year = false;
        for segment in segments.iter() {
            match segment {
                FormatSegment::Token(token) => {
                    pattern.push_str(token.pattern);
                    strftime.push_str(token.strftime);
                    if token.field == FormatField::Year {
                        has_year = true;
                    }
                }
                FormatSegment::Literal(literal) => {
                    pattern.push_str(&regex::escape(literal));
                    // a literal `%` would start a strftime specifier
                    strftime.push_str(&literal.replace('%', "%%"));
                }
            }
        }
        defo!("pattern {:?} strftime {:?}", pattern, strftime);
        let regex_ = match Regex::new(&pattern) {
            Ok(regex_) => regex_,
            Err(err) => {
                return Err(SparklogError::Format {
                    template: template.to_string(),
                    reason: err.to_string(),
                });
            }
        };
        let strftime_fill_year: Option<String> = match has_year {
            true => None,
            false => Some(format!("%Y {}", strftime)),
        };
        let timeformat = TimeFormat {
            template: template.to_string(),
            regex: regex_,
            strftime,
            strftime_fill_year,
        };
        timeformat.validate()?;
        defx!("compiled {:?}", timeformat);

        Ok(timeformat)
    }

    /// the canonical round-trip self-check
    fn validate(&self) -> Result<()> {
        match self.parse_datetime(&self.template) {
            Ok(datetime) if datetime == *CANONICAL_DATETIME => Ok(()),
            Ok(datetime) => Err(SparklogError::Format {
                template: self.template.clone(),
                reason: format!(
                    "template parses to {} which is not the reference instant {}",
                    datetime, *CANONICAL_DATETIME,
                ),
            }),
            Err(err) => Err(SparklogError::Format {
                template: self.template.clone(),
                reason: err.to_string(),
            }),
        }
    }

    /// Parse one matched substring into a datetime.
    ///
    /// Templates without a year field get the canonical year filled in.
    fn parse_datetime(&self, data: &str) -> chrono::format::ParseResult<NaiveDateTime> {
        match &self.strftime_fill_year {
            None => NaiveDateTime::parse_from_str(data, &self.strftime),
            Some(strftime_fill_year) => {
                let data_fill_year = format!("{} {}", CANONICAL_YEAR, data);
                NaiveDateTime::parse_from_str(&data_fill_year, strftime_fill_year)
            }
        }
    }

    /// Find the first timestamp substring on `line` and parse it.
    ///
    /// `None` when nothing on the line matches the pattern, or the match
    /// does not parse as a datetime (e.g. a month-shaped word that is not
    /// a month).
    pub fn find_timestamp(&self, line: &str) -> Option<EpochSecond> {
        let match_ = self.regex.find(line)?;
        let datetime = self.parse_datetime(match_.as_str()).ok()?;

        Some(datetime.and_utc().timestamp())
    }

    /// the template as the user passed it
    pub fn template(&self) -> &str {
        &self.template
    }

    /// the derived regular expression pattern
    pub fn regex_pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// the derived chrono `strftime` pattern
    pub fn strftime_pattern(&self) -> &str {
        &self.strftime
    }

    /// does the template carry a year field?
    pub fn has_year(&self) -> bool {
        self.strftime_fill_year.is_none()
    }
}
