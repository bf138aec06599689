// src/data/mod.rs

//! The _Format Compiler_: turn a user-supplied date-format template into a
//! regular expression that locates timestamp substrings and a parser that
//! turns a located substring into an instant.

pub mod datetime;
