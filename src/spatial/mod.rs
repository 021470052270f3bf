//! Spatial data structures shared by the engine
//!
//! This module contains:
//! - The target cell arena and its builder
//! - Particles and their generational store

/// Particles and the arena that owns them
pub mod particles;
/// Target cells sampled from the source image
pub mod pool;

pub use particles::{Particle, ParticleId, ParticleStore};
pub use pool::{TargetCell, TargetPool};
