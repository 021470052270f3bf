//! Hand-off between an incumbent particle and the challenger that took its cell
//!
//! The incumbent keeps rendering and moving until the frame its challenger
//! settles. Removals collected during a frame are applied together at the end
//! of it, as a set difference over the particle store.

use crate::spatial::particles::{ParticleId, ParticleStore};
use crate::spatial::pool::TargetPool;
use bitvec::prelude::*;
use log::debug;

/// Collects incumbents to remove once their challengers have settled
#[derive(Clone, Debug, Default)]
pub struct ReplacementCoordinator {
    marked: BitVec,
}

impl ReplacementCoordinator {
    /// Create a coordinator with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a particle that settled on this frame
    ///
    /// If it was a challenger, its link is cleared and the incumbent is
    /// marked for removal. A challenger whose cell belongs to an older pool
    /// drops the link without removing anything. Returns the marked incumbent.
    pub fn observe_settled(
        &mut self,
        particles: &mut ParticleStore,
        pool: &TargetPool,
        challenger: ParticleId,
    ) -> Option<ParticleId> {
        let particle = particles.get_mut(challenger)?;
        let incumbent = particle.replaces.take()?;

        if !particle.cell.is_some_and(|cell| pool.is_current(cell)) {
            debug!("{challenger:?} settled after a rebuild, keeping {incumbent:?}");
            return None;
        }
        if !particles.contains(incumbent) {
            return None;
        }

        let index = incumbent.index();
        if self.marked.len() <= index {
            self.marked.resize(index + 1, false);
        }
        self.marked.set(index, true);
        debug!("{challenger:?} settled, removing {incumbent:?}");
        Some(incumbent)
    }

    /// Whether `id` is marked for removal at the end of this frame
    pub fn is_marked(&self, id: ParticleId) -> bool {
        self.marked.get(id.index()).as_deref() == Some(&true)
    }

    /// Number of incumbents awaiting removal
    pub fn pending_removals(&self) -> usize {
        self.marked.count_ones()
    }

    /// Remove every marked incumbent and reset the marks
    pub fn apply_removals(&mut self, particles: &mut ParticleStore) -> usize {
        let removed = particles.remove_marked(&self.marked);
        self.marked.clear();
        removed
    }
}
