// src/charter/mod.rs

//! Chart rendering: bucket counts, the sparkline glyph line, and the
//! time-axis header and footer.

pub mod axis;
pub mod binner;
pub mod sparkline;
