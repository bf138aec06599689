// src/tests/datetime_tests.rs

//! tests for `datetime.rs` functions

#![allow(non_snake_case)]

use crate::common::SparklogError;
use crate::data::datetime::{
    tokenize_format,
    FormatSegment,
    TimeFormat,
    APACHE_COMMON_LOG_DATE_FORMAT,
    CANONICAL_DATE_FORMAT,
};
use crate::tests::common::{
    ymdhms,
    SAMPLE_APACHE_EPOCH,
    SAMPLE_APACHE_TIMESTAMP,
    SAMPLE_HAPROXY_LINE,
};

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// tokenizer
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_tokenize_format_longest_token_wins() {
    // "2006" must be one Year token, not "2" then "06"
    let segments = tokenize_format("2006");
    assert_eq!(segments.len(), 1);
    match &segments[0] {
        FormatSegment::Token(token) => assert_eq!(token.strftime, "%Y"),
        FormatSegment::Literal(literal) => panic!("unexpected literal {:?}", literal),
    }

    // "January" must be one Month token, not "Jan" then literal "uary"
    let segments = tokenize_format("January");
    assert_eq!(segments.len(), 1);
    match &segments[0] {
        FormatSegment::Token(token) => assert_eq!(token.strftime, "%B"),
        FormatSegment::Literal(literal) => panic!("unexpected literal {:?}", literal),
    }

    // ".000000" must be one Fractional token, not ".000" twice
    let segments = tokenize_format(".000000");
    assert_eq!(segments.len(), 1);
    match &segments[0] {
        FormatSegment::Token(token) => assert_eq!(token.strftime, "%.6f"),
        FormatSegment::Literal(literal) => panic!("unexpected literal {:?}", literal),
    }
}

#[test]
fn test_tokenize_format_literal_runs() {
    // "T" and "Z" are not tokens; they must survive as literal runs
    let segments = tokenize_format("2006-01-02T15:04:05Z");
    let literals: Vec<&str> = segments
        .iter()
        .filter_map(|segment| match segment {
            FormatSegment::Literal(literal) => Some(*literal),
            FormatSegment::Token(_) => None,
        })
        .collect();
    assert_eq!(literals, vec!["-", "-", "T", ":", ":", "Z"]);
}

#[test]
fn test_tokenize_format_empty() {
    assert!(tokenize_format("").is_empty());
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// template compilation and the canonical round-trip check
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(APACHE_COMMON_LOG_DATE_FORMAT; "apache common log")]
#[test_case(CANONICAL_DATE_FORMAT; "ansic")]
#[test_case("Jan 2 15:04:05"; "syslog no year")]
#[test_case("Jan  2 15:04:05"; "syslog padded day")]
#[test_case("2006-01-02 15:04:05"; "iso like")]
#[test_case("2006-01-02T15:04:05"; "iso t separator")]
#[test_case("2006/01/02 15:04:05"; "slashed")]
#[test_case("01/02/2006 03:04:05 PM"; "us style meridiem")]
#[test_case("2/1/2006 15:04:05"; "unpadded day month")]
#[test_case("02/Jan/2006:15:04:05.000000"; "microseconds")]
fn test_TimeFormat_new_valid(template: &str) {
    TimeFormat::new(template).unwrap();
}

#[test_case(""; "empty")]
#[test_case("2006"; "year only")]
#[test_case("Jan 2006"; "no day no time")]
#[test_case("15:04:05"; "time only")]
#[test_case("02/Jan/2006"; "date only")]
#[test_case("completely wrong"; "gibberish")]
#[test_case("03/Jan/2006:15:04:05"; "wrong reference day")]
#[test_case("02/Feb/2006:15:04:05"; "wrong reference month")]
fn test_TimeFormat_new_invalid(template: &str) {
    let result = TimeFormat::new(template);
    assert!(
        matches!(result, Err(SparklogError::Format { .. })),
        "template {:?} should fail the round-trip check, got {:?}",
        template,
        result,
    );
}

#[test_case(
    APACHE_COMMON_LOG_DATE_FORMAT,
    r"\d{2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}\.\d{3}",
    "%d/%b/%Y:%H:%M:%S%.3f";
    "apache common log"
)]
#[test_case(
    "2/Jan/2006:15:04:05.000",
    r"\d{1,2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}\.\d{3}",
    "%-d/%b/%Y:%H:%M:%S%.3f";
    "unpadded day"
)]
#[test_case(
    "Jan 2 15:04:05",
    r"[A-Za-z]{3} \d{1,2} \d{2}:\d{2}:\d{2}",
    "%b %-d %H:%M:%S";
    "syslog no year"
)]
fn test_TimeFormat_derived_patterns(template: &str, pattern: &str, strftime: &str) {
    let format = TimeFormat::new(template).unwrap();
    assert_eq!(format.regex_pattern(), pattern);
    assert_eq!(format.strftime_pattern(), strftime);
}

#[test]
fn test_TimeFormat_has_year() {
    assert!(TimeFormat::new(APACHE_COMMON_LOG_DATE_FORMAT)
        .unwrap()
        .has_year());
    assert!(!TimeFormat::new("Jan 2 15:04:05").unwrap().has_year());
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// finding timestamps within log lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_find_timestamp_haproxy_line() {
    let format = TimeFormat::new(APACHE_COMMON_LOG_DATE_FORMAT).unwrap();
    assert_eq!(
        format.find_timestamp(SAMPLE_HAPROXY_LINE),
        Some(SAMPLE_APACHE_EPOCH),
    );
}

#[test]
fn test_find_timestamp_bare() {
    let format = TimeFormat::new(APACHE_COMMON_LOG_DATE_FORMAT).unwrap();
    assert_eq!(
        format.find_timestamp(SAMPLE_APACHE_TIMESTAMP),
        Some(SAMPLE_APACHE_EPOCH),
    );
    assert_eq!(
        format.find_timestamp(SAMPLE_APACHE_TIMESTAMP),
        Some(ymdhms(2019, 11, 23, 6, 26, 40)),
    );
}

#[test]
fn test_find_timestamp_no_match() {
    let format = TimeFormat::new(APACHE_COMMON_LOG_DATE_FORMAT).unwrap();
    assert_eq!(format.find_timestamp("no timestamp here"), None);
    assert_eq!(format.find_timestamp(""), None);
}

#[test]
fn test_find_timestamp_match_does_not_parse() {
    // "Xyz" is month-shaped for the regex but is not a month
    let format = TimeFormat::new(APACHE_COMMON_LOG_DATE_FORMAT).unwrap();
    assert_eq!(format.find_timestamp("12/Xyz/2019:06:26:40.781"), None);
}

#[test]
fn test_find_timestamp_yearless_fills_canonical_year() {
    // classic syslog lines carry no year; the canonical year is filled in
    let format = TimeFormat::new("Jan 2 15:04:05").unwrap();
    assert_eq!(
        format.find_timestamp("Nov 23 06:26:40 localhost sshd[1022]: session opened"),
        Some(ymdhms(2006, 11, 23, 6, 26, 40)),
    );
}
