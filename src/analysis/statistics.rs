//! Progress statistics derived from the particle set

use crate::spatial::particles::ParticleStore;

/// Read-only snapshot of particle progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Live particles
    pub total: usize,
    /// Live particles pinned onto their targets
    pub settled: usize,
}

impl Statistics {
    /// Count live and settled particles
    pub fn collect(particles: &ParticleStore) -> Self {
        let mut stats = Self::default();
        for (_, particle) in particles.iter() {
            stats.total += 1;
            if particle.is_settled {
                stats.settled += 1;
            }
        }
        stats
    }

    /// Fraction of particles that have settled, `1.0` when there are none
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.settled as f64 / self.total as f64
        }
    }

    /// Whether every particle has settled
    pub const fn is_complete(&self) -> bool {
        self.settled == self.total
    }
}

/// Receives statistics snapshots for progress reporting
pub trait StatisticsObserver {
    /// Called with the latest snapshot
    fn observe(&mut self, frame: u64, statistics: Statistics);
}
