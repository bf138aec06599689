// src/charter/binner.rs

//! The _Bucketizer_: bin an ordered timestamp sequence into a fixed number
//! of equal time slices.

use crate::common::{Count, EpochSecond};

/// Bin `times` (original line order) into `bucket_count` equal time slices
/// spanning the positionally-first through positionally-last timestamps.
///
/// Proportional policy: with `spread = last - first + 1`, a line at time
/// `t` lands in bucket `bucket_count * (t - first) / spread`, which for
/// `t` in `first..=last` is always below `bucket_count` — no special case
/// for a zero-width span and no out-of-range index.
///
/// Timestamps before `first` (possible only when log lines are not in
/// chronological order) are dropped, not clamped into bucket 0. A
/// timestamp past `last` (positionally-last was not the maximum) is
/// likewise dropped as a defensive bound.
pub fn bin_timestamps(times: &[EpochSecond], bucket_count: usize) -> Vec<Count> {
    let mut buckets: Vec<Count> = vec![0; bucket_count];
    if bucket_count == 0 {
        return buckets;
    }
    match times.len() {
        0 => return buckets,
        1 => {
            buckets[0] = 1;
            return buckets;
        }
        _ => {}
    }

    let first: EpochSecond = times[0];
    let last: EpochSecond = times[times.len() - 1];
    let spread: i64 = (last - first + 1).max(1);
    for time in times.iter() {
        if *time < first {
            continue;
        }
        let bucket: usize = ((bucket_count as i64 * (*time - first)) / spread) as usize;
        if bucket >= bucket_count {
            continue;
        }
        buckets[bucket] += 1;
    }

    buckets
}
