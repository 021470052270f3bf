//! Stochastic matching of drawn marks to target cells
//!
//! Each call draws a fixed number of pool indices with replacement and keeps
//! the lowest-penalty cell, so the cost per mark is constant regardless of
//! pool size. The result is a sampled heuristic, not a nearest-cell search.

use crate::algorithm::motion::{retarget, spawn};
use crate::io::configuration::EngineConfig;
use crate::math::color::{alpha_factor, color_distance, opaque_part, with_alpha};
use crate::math::random::RandomSource;
use crate::spatial::particles::{ParticleId, ParticleStore};
use crate::spatial::pool::{TargetCell, TargetPool};
use image::Rgba;
use log::debug;

/// Result of one assignment call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// A new particle claimed a free cell
    Claimed(ParticleId),
    /// A new particle claimed an occupied cell and will replace the incumbent
    Challenged {
        /// Newly created particle now bound to the cell
        challenger: ParticleId,
        /// Previous occupant, removed once the challenger settles
        incumbent: ParticleId,
    },
    /// The cell's in-flight occupant was redirected in place
    Retargeted(ParticleId),
    /// Nothing happened
    Skipped,
}

/// Lowest-penalty cell among the sampled draws
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Index of the cell in the pool
    pub index: usize,
    /// Penalty of the cell for the requested point and color
    pub penalty: f64,
}

/// Penalty of placing a mark of `color` drawn at `point` into `cell`
///
/// Spatial distance, plus color distance scaled by the mark's alpha, plus a
/// flat penalty when occupied, plus a priority term that shrinks as the
/// cell's feature score grows.
pub fn penalty(
    cell: &TargetCell,
    point: [f64; 2],
    color: Rgba<u8>,
    occupied: bool,
    config: &EngineConfig,
) -> f64 {
    let dx = f64::from(cell.position[0]) - point[0];
    let dy = f64::from(cell.position[1]) - point[1];
    let spatial = dx.hypot(dy);
    let chromatic = color_distance(opaque_part(color), cell.color) * alpha_factor(color);
    let occupancy = if occupied {
        config.occupied_penalty
    } else {
        0.0
    };
    let priority = config.priority_scale / (1.0 + cell.feature_score.max(0.0));

    spatial + chromatic + occupancy + priority
}

/// Whether the cell at `index` is bound to a live particle
fn live_occupant(pool: &TargetPool, particles: &ParticleStore, index: usize) -> Option<ParticleId> {
    pool.occupant(index).filter(|&id| particles.contains(id))
}

/// Draw `config.sample_count` cells uniformly and return the cheapest
///
/// Returns `None` when the pool is empty.
pub fn sample_best(
    pool: &TargetPool,
    particles: &ParticleStore,
    point: [f64; 2],
    color: Rgba<u8>,
    config: &EngineConfig,
    rng: &mut RandomSource,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for _ in 0..config.sample_count {
        let index = rng.index(pool.len())?;
        let Some(cell) = pool.cell(index) else {
            continue;
        };
        let occupied = live_occupant(pool, particles, index).is_some();
        let candidate = Candidate {
            index,
            penalty: penalty(cell, point, color, occupied, config),
        };
        if best.is_none_or(|current| candidate.penalty < current.penalty) {
            best = Some(candidate);
        }
    }

    best
}

/// Whether `proposed` beats the incumbent's match by more than the margin
pub fn improves_match(
    cell: &TargetCell,
    incumbent: Rgba<u8>,
    proposed: Rgba<u8>,
    config: &EngineConfig,
) -> bool {
    let current = color_distance(opaque_part(incumbent), cell.color);
    let candidate = color_distance(opaque_part(proposed), cell.color);
    candidate < current * config.takeover_margin
}

/// Match a mark drawn at `point` with `color` to a cell in `pool`
///
/// A free winner is claimed by a new particle. An occupied winner is only
/// taken when the proposed color improves on the occupant's by the configured
/// margin: an occupant still in flight is redirected in place, a settled one
/// is challenged by a new particle that replaces it once it settles.
pub fn assign(
    pool: &mut TargetPool,
    particles: &mut ParticleStore,
    point: [f64; 2],
    color: Rgba<u8>,
    config: &EngineConfig,
    rng: &mut RandomSource,
) -> Assignment {
    let Some(best) = sample_best(pool, particles, point, color, config, rng) else {
        return Assignment::Skipped;
    };
    let Some(cell) = pool.cell(best.index).cloned() else {
        return Assignment::Skipped;
    };

    let color = if config.fidelity_bias && rng.chance(config.native_color_probability) {
        with_alpha(cell.color, color.0[3])
    } else {
        color
    };
    let cell_ref = pool.reference(best.index);

    let Some(incumbent_id) = live_occupant(pool, particles, best.index) else {
        let particle = spawn(point, cell.position, Some(cell_ref), color, config, rng);
        let id = particles.insert(particle);
        pool.set_occupant(best.index, Some(id));
        debug!("claimed cell {:?} for {id:?}", cell.position);
        return Assignment::Claimed(id);
    };

    let Some(incumbent) = particles.get_mut(incumbent_id) else {
        return Assignment::Skipped;
    };
    if !improves_match(&cell, incumbent.color, color, config) {
        return Assignment::Skipped;
    }

    if !incumbent.is_settled {
        let delay = rng.uniform(0.0, config.max_arrival_delay);
        retarget(
            incumbent,
            cell.position,
            Some(cell_ref),
            color,
            delay,
            config,
            rng,
        );
        debug!("retargeted {incumbent_id:?} on cell {:?}", cell.position);
        return Assignment::Retargeted(incumbent_id);
    }

    let mut challenger = spawn(point, cell.position, Some(cell_ref), color, config, rng);
    challenger.replaces = Some(incumbent_id);
    let challenger_id = particles.insert(challenger);
    pool.set_occupant(best.index, Some(challenger_id));
    debug!(
        "{challenger_id:?} challenges {incumbent_id:?} for cell {:?}",
        cell.position
    );
    Assignment::Challenged {
        challenger: challenger_id,
        incumbent: incumbent_id,
    }
}
