/// Stochastic matching of marks to target cells
pub mod assignment;
/// Per-frame driver for the whole particle system
pub mod driver;
/// Spring motion of a single particle
pub mod motion;
/// Cancelable timer that starts the morph phase
pub mod phase;
/// Deferred removal of replaced incumbents
pub mod replacement;
