// src/charter/sparkline.rs

//! The _Sparkline Renderer_: map per-bucket counts to one printable line
//! of Unicode block glyphs. A pure function of the magnitudes.

use crate::common::Count;

/// Unicode block characters, lowest to highest magnitude.
pub const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render `counts` as one sparkline line, one glyph per count.
///
/// Each count maps to a block glyph scaled linearly between the minimum
/// and maximum observed count; all-equal input renders as the lowest
/// block. The output char length equals `counts.len()`.
pub fn sparkline(counts: &[Count]) -> String {
    let min: Count = counts.iter().copied().min().unwrap_or(0);
    let max: Count = counts.iter().copied().max().unwrap_or(0);
    // the block glyphs are 3 bytes each in UTF-8
    let mut line = String::with_capacity(counts.len() * 3);
    for count in counts.iter() {
        let index: usize = match max == min {
            true => 0,
            false => {
                let scaled: f64 =
                    (count - min) as f64 / (max - min) as f64 * (SPARKS.len() - 1) as f64;
                (scaled.round() as usize).min(SPARKS.len() - 1)
            }
        };
        line.push(SPARKS[index]);
    }

    line
}
