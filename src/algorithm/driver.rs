//! Per-frame driver owning the pool, the particles and the morph phase
//!
//! Everything runs on one thread: stroke input and frame ticks interleave
//! through `&mut self`, so an assignment always sees a consistent pool and
//! particle set, and a rebuild swaps the pool wholesale between ticks.

use crate::algorithm::assignment::{Assignment, assign};
use crate::algorithm::motion::{Motion, advance};
use crate::algorithm::phase::PhaseController;
use crate::algorithm::replacement::ReplacementCoordinator;
use crate::analysis::statistics::Statistics;
use crate::io::configuration::{BACKGROUND, EngineConfig};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::load_target;
use crate::io::strokes::{StrokeEvent, jittered_points};
use crate::io::surface::Surface;
use crate::math::random::RandomSource;
use crate::spatial::particles::{ParticleId, ParticleStore};
use crate::spatial::pool::TargetPool;
use image::{Rgba, RgbaImage};
use log::{info, warn};
use std::path::Path;

/// What happened during one frame
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame counter after this tick
    pub frame: u64,
    /// Whether the morph phase began on this frame
    pub phase_started: bool,
    /// Particles advanced by the motion model
    pub moved: usize,
    /// Particles that snapped onto their targets on this frame
    pub settled: Vec<ParticleId>,
    /// Incumbents removed at the end of this frame
    pub removed: usize,
}

/// Cooperative animation loop for one canvas
pub struct Animator {
    width: u32,
    height: u32,
    config: EngineConfig,
    pool: TargetPool,
    particles: ParticleStore,
    replacements: ReplacementCoordinator,
    phase: PhaseController,
    rng: RandomSource,
    frame: u64,
    morphing: bool,
    phase_start: u64,
    running: bool,
}

impl Animator {
    /// Create a stopped driver for a `width`x`height` canvas with an empty pool
    pub fn new(width: u32, height: u32, config: EngineConfig, seed: u64) -> Self {
        Self {
            width,
            height,
            config,
            pool: TargetPool::new(),
            particles: ParticleStore::new(),
            replacements: ReplacementCoordinator::new(),
            phase: PhaseController::new(),
            rng: RandomSource::new(seed),
            frame: 0,
            morphing: false,
            phase_start: 0,
            running: false,
        }
    }

    /// Begin accepting ticks
    pub const fn start(&mut self) {
        self.running = true;
    }

    /// Stop accepting ticks; state is kept
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Whether ticks are being accepted
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Replace the target pool with a sampling of `raster`
    ///
    /// Existing particles keep moving toward their old targets but lose all
    /// slot protection. On error the previous pool is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster doesn't match the canvas or `stride` is zero
    pub fn rebuild_pool(&mut self, raster: &RgbaImage, stride: u32) -> Result<()> {
        if raster.dimensions() != (self.width, self.height) {
            let err = invalid_parameter(
                "raster",
                &format!("{}x{}", raster.width(), raster.height()),
                &format!("must match the {}x{} canvas", self.width, self.height),
            );
            warn!("target pool kept: {err}");
            return Err(err);
        }
        self.pool
            .rebuild(raster, stride, &self.config)
            .inspect_err(|err| warn!("target pool kept: {err}"))
    }

    /// Decode the image at `path`, fit it to the canvas and rebuild the pool
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded or `stride` is zero;
    /// the previous pool is kept in either case
    pub fn rebuild_from_path(&mut self, path: &Path, stride: u32) -> Result<()> {
        let raster = load_target(path, self.width, self.height)
            .inspect_err(|err| warn!("target pool kept: {err}"))?;
        self.rebuild_pool(&raster, stride)
    }

    /// Drawing resumed: cancel the pending phase start and stop morphing
    pub fn begin_stroke(&mut self) {
        self.phase.cancel();
        self.exit_morph();
    }

    /// Drawing paused: start the morph phase after the quiescence delay
    pub fn end_stroke(&mut self) {
        self.phase.schedule(self.frame, self.config.quiescence_delay);
    }

    /// Deposit `event.density` marks jittered around the event position
    pub fn stroke(&mut self, event: &StrokeEvent) -> Vec<Assignment> {
        let points = jittered_points(event, self.config.jitter_radius, &mut self.rng);
        points
            .into_iter()
            .map(|point| self.assign(point, event.color))
            .collect()
    }

    /// Match a single mark to the pool
    pub fn assign(&mut self, point: [f64; 2], color: Rgba<u8>) -> Assignment {
        assign(
            &mut self.pool,
            &mut self.particles,
            point,
            color,
            &self.config,
            &mut self.rng,
        )
    }

    /// Start the morph phase on the current frame
    pub fn enter_morph(&mut self) {
        if !self.morphing {
            info!("morph phase started at frame {}", self.frame);
        }
        self.morphing = true;
        self.phase_start = self.frame;
    }

    /// Leave the morph phase immediately
    pub fn exit_morph(&mut self) {
        if self.morphing {
            info!("morph phase stopped at frame {}", self.frame);
        }
        self.morphing = false;
    }

    /// Advance one frame; returns `None` while stopped
    ///
    /// The motion model runs over every particle while morphing, settle
    /// transitions are handed to the replacement coordinator, and incumbents
    /// it marked are removed after all particles have moved.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }

        self.frame += 1;
        let mut report = TickReport {
            frame: self.frame,
            ..TickReport::default()
        };

        if self.phase.poll(self.frame).is_some() {
            self.enter_morph();
            report.phase_started = true;
        }

        if self.morphing {
            let elapsed = (self.frame - self.phase_start) as f64;
            for id in self.particles.ids() {
                let Some(particle) = self.particles.get_mut(id) else {
                    continue;
                };
                match advance(particle, elapsed, &self.config, &mut self.rng) {
                    Motion::Moving => report.moved += 1,
                    Motion::Settled => {
                        report.moved += 1;
                        report.settled.push(id);
                    }
                    Motion::Waiting | Motion::AlreadySettled => {}
                }
            }

            for &id in &report.settled {
                self.replacements
                    .observe_settled(&mut self.particles, &self.pool, id);
            }
        }

        report.removed = self.replacements.apply_removals(&mut self.particles);
        Some(report)
    }

    /// Fade the surface and draw every live particle
    pub fn render(&self, surface: &mut impl Surface) {
        surface.fade(Rgba(BACKGROUND), self.config.fade_alpha);
        for (_, particle) in self.particles.iter() {
            surface.fill_rect(
                particle.position[0].floor() as i64,
                particle.position[1].floor() as i64,
                self.config.particle_size,
                particle.color,
            );
        }
    }

    /// Current particle counts
    pub fn statistics(&self) -> Statistics {
        Statistics::collect(&self.particles)
    }

    /// Remove every particle and free every cell, keeping the pool
    pub fn reset(&mut self) {
        self.particles.clear();
        self.pool.clear_occupancy();
        self.replacements = ReplacementCoordinator::new();
        self.phase.cancel();
        self.exit_morph();
    }

    /// Frames ticked so far
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the morph phase is active
    pub const fn is_morphing(&self) -> bool {
        self.morphing
    }

    /// Frame on which the current or last morph phase began
    pub const fn phase_start(&self) -> u64 {
        self.phase_start
    }

    /// Whether a phase start is scheduled
    pub const fn is_phase_pending(&self) -> bool {
        self.phase.is_pending()
    }

    /// Current target pool
    pub const fn pool(&self) -> &TargetPool {
        &self.pool
    }

    /// Live particles
    pub const fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Engine parameters
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canvas width and height
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
