// src/tests/binner_tests.rs

//! tests for `binner.rs` `bin_timestamps`

use crate::charter::binner::bin_timestamps;
use crate::common::{Count, EpochSecond};

#[test]
fn test_zero_timestamps() {
    assert_eq!(bin_timestamps(&[], 5), vec![0; 5]);
}

#[test]
fn test_one_timestamp() {
    assert_eq!(bin_timestamps(&[1234567890], 5), vec![1, 0, 0, 0, 0]);
}

#[test]
fn test_zero_buckets() {
    assert_eq!(bin_timestamps(&[1, 2, 3], 0), Vec::<Count>::new());
}

#[test]
fn test_ten_timestamps_spread_over_80_columns() {
    // ten one-second-apart timestamps across 80 buckets land every 8th
    let times: Vec<EpochSecond> = (1..=10).collect();
    let counts = bin_timestamps(&times, 80);
    let mut expected: Vec<Count> = vec![0; 80];
    for bucket in (0..80).step_by(8) {
        expected[bucket] = 1;
    }
    assert_eq!(counts, expected);
}

#[test]
fn test_identical_timestamps_single_bucket() {
    let counts = bin_timestamps(&[42, 42, 42], 10);
    let mut expected: Vec<Count> = vec![0; 10];
    expected[0] = 3;
    assert_eq!(counts, expected);
}

#[test]
fn test_first_and_last_always_in_range() {
    let counts = bin_timestamps(&[1000, 1500, 2000], 7);
    assert_eq!(counts[0], 1);
    assert_eq!(counts[6], 1);
    assert_eq!(counts.iter().sum::<Count>(), 3);
}

#[test]
fn test_timestamp_before_first_is_dropped() {
    // a clock-skewed line earlier than the positionally-first timestamp
    let counts = bin_timestamps(&[10, 5, 20], 10);
    assert_eq!(counts.iter().sum::<Count>(), 2);
    assert_eq!(counts[0], 1);
    assert_eq!(counts[9], 1);
}

#[test]
fn test_timestamp_after_last_is_dropped() {
    // the positionally-last timestamp was not the maximum
    let counts = bin_timestamps(&[10, 30, 20], 10);
    assert_eq!(counts.iter().sum::<Count>(), 2);
    assert_eq!(counts[0], 1);
    assert_eq!(counts[9], 1);
}
