// src/readers/progressreader.rs

//! The _Progress Reporter_: a [`Read`] decorator that reports
//! percentage-of-bytes-consumed to a callback.
//!
//! [`Read`]: std::io::Read

use std::io::Read;

/// Wraps a reader and invokes a callback whenever the whole-percent value
/// of bytes consumed changes.
///
/// The callback fires at most once per distinct percentage value and never
/// fires when the total size is unknown (`total_bytes == 0`). Not itself
/// concurrent; it belongs to the single thread that owns the underlying
/// reader.
pub struct ProgressReader<R, F>
where
    R: Read,
    F: FnMut(f64),
{
    inner: R,
    current_offset: u64,
    total_bytes: u64,
    progress_fn: F,
}

impl<R, F> ProgressReader<R, F>
where
    R: Read,
    F: FnMut(f64),
{
    /// Wrap `inner`, which is expected to yield `total_bytes` bytes in
    /// total (e.g. from the file metadata). Pass `total_bytes` 0 when the
    /// size is unknown; the callback then never fires.
    pub fn new(inner: R, total_bytes: u64, progress_fn: F) -> ProgressReader<R, F> {
        ProgressReader {
            inner,
            current_offset: 0,
            total_bytes,
            progress_fn,
        }
    }
}

impl<R, F> Read for ProgressReader<R, F>
where
    R: Read,
    F: FnMut(f64),
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n: usize = self.inner.read(buf)?;
        if self.total_bytes > 0 {
            let last_percent: f64 =
                (100.0 * self.current_offset as f64 / self.total_bytes as f64).floor();
            let next_percent: f64 = (100.0 * (self.current_offset + n as u64) as f64
                / self.total_bytes as f64)
                .floor();
            if next_percent != last_percent {
                (self.progress_fn)(next_percent);
            }
        }
        self.current_offset += n as u64;

        Ok(n)
    }
}
