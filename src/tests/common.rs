// src/tests/common.rs

//! Common fixtures for tests.

use ::chrono::{DateTime, NaiveDate, Utc};

use crate::common::EpochSecond;

/// an Apache common-log timestamp as found in HAProxy logs
pub const SAMPLE_APACHE_TIMESTAMP: &str = "23/Nov/2019:06:26:40.781";

/// [`SAMPLE_APACHE_TIMESTAMP`] as seconds since the Unix epoch (UTC)
pub const SAMPLE_APACHE_EPOCH: EpochSecond = 1574490400;

/// one real-world HAProxy log line carrying [`SAMPLE_APACHE_TIMESTAMP`]
pub const SAMPLE_HAPROXY_LINE: &str = "Nov 23 06:26:40 localhost haproxy[20128]: \
127.0.0.1:33317 [23/Nov/2019:06:26:40.781] public myapp/i-05fa49c0e7db8c328 \
0/0/0/78/78 206 913/458 - - ---- 9/9/0/1/0 0/0 \
\"GET /2518cb85-469e-4e2f-a1f1-5f4ffd9349e4/granule.dat HTTP/1.1\"";

/// epoch seconds for a UTC wall-clock datetime
pub fn ymdhms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> EpochSecond {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
        .and_utc()
        .timestamp()
}

/// a fabricated Apache-style log line with the given timestamp
pub fn apache_line(epoch: EpochSecond) -> String {
    let datetime: DateTime<Utc> = DateTime::<Utc>::from_timestamp(epoch, 0).unwrap();

    format!(
        "127.0.0.1 - - [{}] \"GET / HTTP/1.1\" 200 1024",
        datetime.format("%d/%b/%Y:%H:%M:%S%.3f"),
    )
}
