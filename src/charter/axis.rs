// src/charter/axis.rs

//! The _Axis Layout Engine_: lay out labeled time markers above and below
//! the sparkline without horizontal collision.
//!
//! Markers are split between a header canvas (drawn above the sparkline,
//! labels right-aligned on their stems) and a footer canvas (drawn below,
//! labels left-aligned). When a single label row cannot fit all of a
//! canvas's labels, they stack diagonally: each marker's label sits one row
//! further from the sparkline than the previous marker's, its stem growing
//! to meet it.

use std::fmt;

use ::chrono::{DateTime, Utc};
use ::more_asserts::debug_assert_lt;
use ::si_trace_print::{defn, defx};

use crate::common::{ColumnOffset, EpochSecond};

/// strftime pattern for axis labels: weekday, month, day, time-of-day
pub const MARKER_LABEL_FORMAT: &str = "%a %b %-d %H:%M:%S";

const NANOSECONDS_PER_SECOND: i64 = 1_000_000_000;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Canvas
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// how a marker label sits relative to its stem column
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StemAlignment {
    /// the label's leftmost character is on the stem column (footer)
    Left,
    /// the label's rightmost character is on the stem column (header)
    Right,
}

/// whether a canvas sits above or below the sparkline; controls row
/// emission order so labels always face away from the chart
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CanvasKind {
    Header,
    Footer,
}

/// A fixed-size character grid. Row 0 is the sparkline-adjacent row.
///
/// Mutable only through bounds-checked cell and run writes; serialized to
/// text once, by [`fmt::Display`].
pub struct Canvas {
    kind: CanvasKind,
    width: usize,
    rows: Vec<Vec<u8>>,
}

impl Canvas {
    pub fn new(kind: CanvasKind, width: usize, height: usize) -> Canvas {
        Canvas {
            kind,
            width,
            rows: vec![vec![b' '; width]; height],
        }
    }

    /// Write `text` at (`row`, `col`).
    ///
    /// Cells falling outside the canvas are discarded; `col` may be
    /// negative for a run that is only partially visible.
    pub fn put(&mut self, row: usize, col: isize, text: &[u8]) {
        if row >= self.rows.len() {
            return;
        }
        for (i, byte) in text.iter().enumerate() {
            let at: isize = col + i as isize;
            if at < 0 {
                continue;
            }
            let at = at as usize;
            if at >= self.width {
                break;
            }
            self.rows[row][at] = *byte;
        }
    }
}

impl fmt::Display for Canvas {
    /// Serialize every row, each newline-terminated.
    ///
    /// Header rows are emitted top-to-bottom with the sparkline-adjacent
    /// row 0 last; footer rows are emitted sparkline-adjacent row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CanvasKind::Header => {
                for row in self.rows.iter().rev() {
                    writeln!(f, "{}", String::from_utf8_lossy(row))?;
                }
            }
            CanvasKind::Footer => {
                for row in self.rows.iter() {
                    writeln!(f, "{}", String::from_utf8_lossy(row))?;
                }
            }
        }

        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// time markers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// one labeled time marker: a stem column and the instant it points at
#[derive(Clone, Copy, Debug)]
pub struct TimeMarker {
    pub column: ColumnOffset,
    pub time: EpochSecond,
}

impl TimeMarker {
    /// Draw this marker onto `canvas`: a `|` stem cell on every row from
    /// the sparkline-adjacent row up to (excluding) row `height - 1`, and
    /// the label on row `height - 1`.
    pub fn render(&self, canvas: &mut Canvas, height: usize, alignment: StemAlignment) {
        if height == 0 {
            return;
        }
        let label: String = marker_label(self.time);
        for row in 0..height {
            if row == height - 1 {
                let col: isize = match alignment {
                    StemAlignment::Left => self.column as isize,
                    StemAlignment::Right => self.column as isize - (label.len() as isize - 1),
                };
                canvas.put(row, col, label.as_bytes());
            } else {
                canvas.put(row, self.column as isize, b"|");
            }
        }
    }
}

/// format an axis label for one instant (UTC)
pub fn marker_label(time: EpochSecond) -> String {
    match DateTime::<Utc>::from_timestamp(time, 0) {
        Some(datetime) => datetime.format(MARKER_LABEL_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Compute the stem column for each of `marker_count` markers on a canvas
/// `width` columns wide.
///
/// Column 0 is always first and `width - 1` always last; the remaining
/// markers divide the non-edge span into equal segments. `marker_count`
/// of 1 or 2 yields just the two edge columns.
pub fn time_stem_offsets(marker_count: usize, width: usize) -> Vec<ColumnOffset> {
    if width < 2 {
        return vec![0];
    }
    let mut offsets: Vec<ColumnOffset> = Vec::with_capacity(marker_count.max(2));

    // always show a marker at the left edge
    offsets.push(0);

    if marker_count > 2 {
        let skip: f64 = (width - 2) as f64 / (marker_count - 1) as f64;
        let mut current: f64 = skip;
        for _ in 0..(marker_count - 2) {
            // `% width` is a defensive bound; never triggered for valid input
            offsets.push((current.ceil() as ColumnOffset) % width);
            current += skip;
        }
    }

    // always show a marker at the right edge
    offsets.push(width - 1);

    offsets
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// header and footer rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Render the header and footer time-axis blocks for the span of `times`.
///
/// The footer takes the left half of the marker offsets (rounded up when
/// `marker_count` is odd), the header the right half; footer labels grow
/// downward to the right of their stems and header labels upward to the
/// left, both away from the sparkline. A `marker_count` of 0 disables the
/// axis entirely: both strings are empty.
pub fn render_time_axis(
    times: &[EpochSecond],
    marker_count: usize,
    width: usize,
) -> (String, String) {
    if marker_count == 0 || times.is_empty() || width == 0 {
        return (String::new(), String::new());
    }
    defn!("marker_count {} width {}", marker_count, width);

    let first: EpochSecond = times[0];
    let last: EpochSecond = times[times.len() - 1];
    let span_ns: i64 = (last - first) * NANOSECONDS_PER_SECOND;
    let ns_per_column: i64 = span_ns / width as i64;

    // an odd marker count gives the footer the extra marker
    let footer_marker_count: usize = marker_count / 2 + marker_count % 2;
    let offsets: Vec<ColumnOffset> = time_stem_offsets(marker_count, width);
    let split: usize = footer_marker_count.min(offsets.len());
    let footer_offsets: &[ColumnOffset] = &offsets[..split];
    let header_offsets: &[ColumnOffset] = &offsets[split..];

    let header: Canvas =
        render_axis_canvas(CanvasKind::Header, header_offsets, width, first, ns_per_column);
    let footer: Canvas =
        render_axis_canvas(CanvasKind::Footer, footer_offsets, width, first, ns_per_column);
    defx!();

    (header.to_string(), footer.to_string())
}

/// Render one canvas of markers.
///
/// Labels stack diagonally when a single row cannot fit them all side by
/// side, i.e. when `(label_width + 1) * marker_count ≥ width / 2`;
/// otherwise every label sits on the row adjacent to the sparkline with a
/// stem of height 1.
fn render_axis_canvas(
    kind: CanvasKind,
    marker_offsets: &[ColumnOffset],
    width: usize,
    first: EpochSecond,
    ns_per_column: i64,
) -> Canvas {
    let mut canvas = Canvas::new(kind, width, marker_offsets.len() + 1);
    let label_width: usize = marker_label(first).len();
    let stacked: bool = (label_width + 1) * marker_offsets.len() >= width / 2;
    let alignment: StemAlignment = match kind {
        CanvasKind::Header => StemAlignment::Right,
        CanvasKind::Footer => StemAlignment::Left,
    };
    for (index, offset) in marker_offsets.iter().enumerate() {
        debug_assert_lt!(*offset, width);
        let height: usize = match (stacked, kind) {
            // the leftmost footer marker reaches deepest; the rightmost
            // header marker reaches highest
            (true, CanvasKind::Header) => index + 2,
            (true, CanvasKind::Footer) => marker_offsets.len() - index + 1,
            (false, _) => 2,
        };
        let time: EpochSecond = first + (*offset as i64 * ns_per_column) / NANOSECONDS_PER_SECOND;
        TimeMarker {
            column: *offset,
            time,
        }
        .render(&mut canvas, height, alignment);
    }

    canvas
}
