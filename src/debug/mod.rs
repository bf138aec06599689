// src/debug/mod.rs

//! Macros for printing messages to the user on the error stream.

pub mod printers;
