//! Pointillist reconstruction of a target image from freely drawn marks
//!
//! Marks deposited on a canvas are matched to cells sampled from a target
//! image. Once drawing pauses, every mark springs toward its cell, and a mark
//! that matches a cell's color better than the current occupant takes it over
//! without the cell ever appearing empty.

#![forbid(unsafe_code)]

/// Assignment, motion, replacement and the animation driver
pub mod algorithm;
/// Feature scoring and progress statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Color metrics and seeded randomness
pub mod math;
/// Target cells and particles
pub mod spatial;

pub use io::error::{EngineError, Result};
