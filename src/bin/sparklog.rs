// src/bin/sparklog.rs

//! Driver program _sparklog_ drives the [_sparkloglib_].
//!
//! Processes user-passed command-line arguments, compiles the date-format
//! template into a [`TimeFinder`], scans the passed log file for
//! timestamps, and prints a sparkline of line density over time to STDOUT,
//! with optional labeled time markers above and below it.
//!
//! `sparklog.rs` should be the main thread and the only thread that prints
//! to STDOUT. Progress and errors go to STDERR.
//!
//! [_sparkloglib_]: sparkloglib
//! [`TimeFinder`]: sparkloglib::readers::timefinder::TimeFinder

#![allow(non_camel_case_types)]

use std::fs::File;
use std::process::ExitCode;
use std::thread;

use ::clap::Parser;
use ::const_format::concatcp;
use ::si_trace_print::stack::stack_offset_set;
use ::si_trace_print::{defn, defo, defx};

use ::sparkloglib::charter::axis::render_time_axis;
use ::sparkloglib::charter::binner::bin_timestamps;
use ::sparkloglib::charter::sparkline::sparkline;
use ::sparkloglib::common::{Count, EpochSecond, FPath, SparklogError};
use ::sparkloglib::data::datetime::{APACHE_COMMON_LOG_DATE_FORMAT, CANONICAL_DATE_FORMAT};
use ::sparkloglib::e_err;
use ::sparkloglib::readers::progressreader::ProgressReader;
use ::sparkloglib::readers::timefinder::{ParsePolicy, TimeFinder};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// chart width when the terminal geometry cannot be queried
/// (e.g. STDOUT is a pipe)
const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
The date format TEMPLATE is written as the canonical instant

    ", CANONICAL_DATE_FORMAT, "

rendered the way timestamps appear in the log file. For example, an Apache
common log timestamp like \"23/Nov/2019:06:26:40.781\" is matched by the
template \"", APACHE_COMMON_LOG_DATE_FORMAT, "\".

A TEMPLATE must include at least a day and a time of day. Lines without a
matching timestamp are skipped unless --strict is passed.",
);

// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    name = "sparklog",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(sparklog)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the log file to chart.
    #[clap(required = true, verbatim_doc_comment)]
    path: FPath,

    /// Date format TEMPLATE of the timestamps in the log file,
    /// written as the canonical instant "Mon Jan 2 15:04:05 2006".
    #[clap(
        short = 'f',
        long = "format",
        verbatim_doc_comment,
        default_value_t = String::from(APACHE_COMMON_LOG_DATE_FORMAT),
    )]
    format: String,

    /// Number of labeled time markers to draw around the sparkline.
    /// Markers split between a footer block (left half, rounded up)
    /// and a header block (right half). 0 disables the time axis.
    #[clap(
        short = 'm',
        long = "markers",
        verbatim_doc_comment,
        default_value_t = 0,
    )]
    markers: usize,

    /// Number of scanning threads.
    /// Defaults to the available hardware parallelism.
    #[clap(short = 'c', long = "concurrency", verbatim_doc_comment)]
    concurrency: Option<usize>,

    /// Fail on the first line without a parseable timestamp
    /// instead of skipping it.
    #[clap(short = 's', long = "strict", verbatim_doc_comment)]
    strict: bool,

    /// Print scanning progress to STDERR.
    #[clap(short = 'p', long = "progress", verbatim_doc_comment)]
    progress: bool,
}

/// the columns available for the chart; queried from the controlling
/// terminal, with a fixed fallback when there is none
fn terminal_width() -> usize {
    match ::crossterm::terminal::size() {
        Ok((columns, _rows)) => columns as usize,
        Err(_) => FALLBACK_TERMINAL_WIDTH,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Scan the file at `path` for timestamps.
fn scan_file(
    finder: &TimeFinder,
    path: &FPath,
    progress: bool,
) -> Result<Vec<EpochSecond>, SparklogError> {
    defn!("({:?})", path);
    let file: File = File::open(path)?;
    let times: Vec<EpochSecond> = if progress {
        let total_bytes: u64 = file.metadata()?.len();
        defo!("total_bytes {}", total_bytes);
        let reader = ProgressReader::new(file, total_bytes, |percent| {
            eprint!("\r{:3.0}%", percent);
        });
        let times = finder.find_times(reader);
        // clear the progress line
        eprint!("\r{:4}\r", "");
        times?
    } else {
        finder.find_times(file)?
    };
    defx!("found {} timestamps", times.len());

    Ok(times)
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let policy: ParsePolicy = match args.strict {
        true => ParsePolicy::Strict,
        false => ParsePolicy::Lenient,
    };
    let concurrency: usize = match args.concurrency {
        Some(concurrency) => concurrency,
        None => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
    };

    let finder: TimeFinder = match TimeFinder::new(&args.format, concurrency, policy) {
        Ok(finder) => finder,
        Err(err) => {
            e_err!("{}", err);
            e_err!(
                "a format TEMPLATE must include at least a day and a time of day, \
written as the canonical instant {:?}",
                CANONICAL_DATE_FORMAT,
            );
            return ExitCode::FAILURE;
        }
    };

    let times: Vec<EpochSecond> = match scan_file(&finder, &args.path, args.progress) {
        Ok(times) => times,
        Err(err) => {
            e_err!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if times.is_empty() {
        e_err!("{}", SparklogError::NoTimestamps);
        return ExitCode::FAILURE;
    }

    let width: usize = terminal_width();
    defo!("width {}", width);
    let counts: Vec<Count> = bin_timestamps(&times, width);
    let (header, footer) = render_time_axis(&times, args.markers, width);

    print!("{}", header);
    println!("{}", sparkline(&counts));
    print!("{}", footer);
    defx!();

    ExitCode::SUCCESS
}
