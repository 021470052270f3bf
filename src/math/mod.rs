//! Mathematical utilities for the engine

/// Color distances, brightness and alpha weighting
pub mod color;
/// Seeded random source for sampling and motion noise
pub mod random;
