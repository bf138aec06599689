// src/readers/mod.rs

//! Readers for the scan pass: the [`TimeFinder`] timestamp extractor and
//! the [`ProgressReader`] byte-progress decorator.
//!
//! [`TimeFinder`]: crate::readers::timefinder::TimeFinder
//! [`ProgressReader`]: crate::readers::progressreader::ProgressReader

pub mod progressreader;
pub mod timefinder;
