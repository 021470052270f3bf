//! Seeded random source for reproducible sampling and motion noise

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

/// Deterministic random source shared by every stochastic step of the engine
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a random source from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniform value in `low..=high`; degenerate bands return `low`
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform value in `-bound..=bound`
    pub fn symmetric(&mut self, bound: f64) -> f64 {
        self.uniform(-bound, bound)
    }

    /// Bernoulli trial with success probability `probability`
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Point drawn uniformly from the disc of `radius` around `center`
    pub fn point_in_disc(&mut self, center: [f64; 2], radius: f64) -> [f64; 2] {
        let r = radius * self.rng.random::<f64>().sqrt();
        let theta = TAU * self.rng.random::<f64>();
        [
            r.mul_add(theta.cos(), center[0]),
            r.mul_add(theta.sin(), center[1]),
        ]
    }
}
