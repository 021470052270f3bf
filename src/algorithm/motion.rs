//! Per-particle spring motion toward the assigned target
//!
//! Velocity is eased toward the target, perturbed by noise that fades as the
//! particle closes in, then damped. Exponential decay never reaches the target
//! exactly, so a particle inside the snap threshold is pinned onto it.

use crate::io::configuration::EngineConfig;
use crate::math::random::RandomSource;
use crate::spatial::particles::{CellRef, Particle};
use image::Rgba;

/// Outcome of advancing one particle by one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Arrival delay has not elapsed yet
    Waiting,
    /// Moved and still outside the snap threshold
    Moving,
    /// Snapped onto the target on this frame
    Settled,
    /// Was already settled, nothing changed
    AlreadySettled,
}

/// Create a particle at `point` bound for `target`
///
/// Velocity, ease, friction and arrival delay are drawn from the configured
/// bands so the population doesn't move in lockstep.
pub fn spawn(
    point: [f64; 2],
    target: [i32; 2],
    cell: Option<CellRef>,
    color: Rgba<u8>,
    config: &EngineConfig,
    rng: &mut RandomSource,
) -> Particle {
    let mut particle = Particle {
        position: point,
        target,
        velocity: [0.0, 0.0],
        color,
        arrival_delay: 0.0,
        is_settled: false,
        ease_rate: 0.0,
        friction_rate: 0.0,
        replaces: None,
        cell,
    };
    randomize_dynamics(&mut particle, config, rng);
    particle.arrival_delay = rng.uniform(0.0, config.max_arrival_delay);
    particle
}

/// Redirect a particle to a new target, color and arrival delay
///
/// Clears the settled flag and draws fresh velocity, ease and friction, so
/// the approach restarts from the particle's current position.
pub fn retarget(
    particle: &mut Particle,
    target: [i32; 2],
    cell: Option<CellRef>,
    color: Rgba<u8>,
    arrival_delay: f64,
    config: &EngineConfig,
    rng: &mut RandomSource,
) {
    particle.target = target;
    particle.cell = cell;
    particle.color = color;
    particle.arrival_delay = arrival_delay;
    particle.is_settled = false;
    randomize_dynamics(particle, config, rng);
}

fn randomize_dynamics(particle: &mut Particle, config: &EngineConfig, rng: &mut RandomSource) {
    particle.velocity = [
        rng.symmetric(config.initial_velocity),
        rng.symmetric(config.initial_velocity),
    ];
    particle.ease_rate = rng.uniform(config.ease_range.0, config.ease_range.1);
    particle.friction_rate = rng.uniform(config.friction_range.0, config.friction_range.1);
}

/// Advance `particle` by one frame, `elapsed` frames after the morph phase began
pub fn advance(
    particle: &mut Particle,
    elapsed: f64,
    config: &EngineConfig,
    rng: &mut RandomSource,
) -> Motion {
    if particle.is_settled {
        return Motion::AlreadySettled;
    }
    if elapsed < particle.arrival_delay {
        return Motion::Waiting;
    }

    let [dx, dy] = particle.offset_to_target();
    let distance = dx.hypot(dy);

    particle.velocity[0] = particle.ease_rate.mul_add(dx, particle.velocity[0]);
    particle.velocity[1] = particle.ease_rate.mul_add(dy, particle.velocity[1]);

    if distance >= config.noise_cutoff {
        let scale = (distance / config.noise_falloff).min(1.0);
        particle.velocity[0] += rng.symmetric(1.0) * scale;
        particle.velocity[1] += rng.symmetric(1.0) * scale;
    }

    particle.velocity[0] *= particle.friction_rate;
    particle.velocity[1] *= particle.friction_rate;
    particle.position[0] += particle.velocity[0];
    particle.position[1] += particle.velocity[1];

    if particle.distance_to_target() < config.snap_threshold {
        particle.position = [f64::from(particle.target[0]), f64::from(particle.target[1])];
        particle.velocity = [0.0, 0.0];
        particle.is_settled = true;
        Motion::Settled
    } else {
        Motion::Moving
    }
}
