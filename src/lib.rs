//! Tolerance chain stack-up analysis
//!
//! Turns a table of dimensional contributors into a worst-case and
//! statistical (RSS) resultant, with optional target verdicts and Monte Carlo
//! simulation. The engine (`core`, `entities`) has no presentation
//! dependencies; `cli` is a thin command-line shell around it.

pub mod cli;
pub mod core;
pub mod entities;
