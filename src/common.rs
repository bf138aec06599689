// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

pub use std::fs::File;
pub use std::path::Path;

use ::thiserror::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FileMetadata = std::fs::Metadata;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// timestamps, buckets, canvases
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// a count of anything, typically log lines per bucket
pub type Count = u64;

/// seconds since the Unix epoch; may be negative
pub type EpochSecond = i64;

/// a column within a character canvas (and the terminal)
pub type ColumnOffset = usize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// All fatal error conditions of a scan-and-render pass.
///
/// The library only returns these; translating one into a process exit code
/// and a printed message is solely the job of the program binary.
#[derive(Debug, Error)]
pub enum SparklogError {
    /// the date-format template failed the canonical round-trip check
    #[error("invalid date/time format {template:?}: {reason}")]
    Format { template: String, reason: String },

    /// the log file could not be opened or read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// a strict-policy scan hit a line without a parseable timestamp
    #[error("couldn't find time in line {line:?}")]
    LineParse { line: String },

    /// the whole scan yielded zero timestamps; binning and axis layout
    /// are undefined on an empty sequence
    #[error("didn't find any lines with recognizable dates")]
    NoTimestamps,
}

pub type Result<T> = std::result::Result<T, SparklogError>;
