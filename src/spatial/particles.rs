//! Particles and the generational store that owns them
//!
//! Target cells and challengers refer to particles through [`ParticleId`]
//! handles rather than references. A handle carries the generation of its
//! slot, so a handle that outlives its particle simply stops resolving.

use bitvec::prelude::*;
use image::Rgba;

/// Stable handle to a particle in a [`ParticleStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId {
    index: usize,
    generation: u32,
}

impl ParticleId {
    /// Slot index inside the owning store
    pub const fn index(self) -> usize {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Reference to a target cell, tagged with the pool epoch it was issued in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    /// Index into the pool's cell arena
    pub index: usize,
    /// Pool epoch at assignment time
    pub epoch: u64,
}

/// A single drawn mark moving toward its assigned target cell
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position in canvas coordinates
    pub position: [f64; 2],
    /// Grid position of the assigned target cell
    pub target: [i32; 2],
    /// Current velocity per frame
    pub velocity: [f64; 2],
    /// Drawn color
    pub color: Rgba<u8>,
    /// Frames after the morph phase starts before this particle moves
    pub arrival_delay: f64,
    /// Pinned exactly onto `target`
    pub is_settled: bool,
    /// Spring coefficient pulling velocity toward the target
    pub ease_rate: f64,
    /// Velocity damping factor applied every frame
    pub friction_rate: f64,
    /// Incumbent to remove once this particle settles
    pub replaces: Option<ParticleId>,
    /// Cell this particle was assigned to
    pub cell: Option<CellRef>,
}

impl Particle {
    /// Vector from the current position to the target
    pub fn offset_to_target(&self) -> [f64; 2] {
        [
            f64::from(self.target[0]) - self.position[0],
            f64::from(self.target[1]) - self.position[1],
        ]
    }

    /// Euclidean distance to the target
    pub fn distance_to_target(&self) -> f64 {
        let [dx, dy] = self.offset_to_target();
        dx.hypot(dy)
    }

    /// Whether this particle is waiting to take over another particle's cell
    pub const fn is_challenger(&self) -> bool {
        self.replaces.is_some()
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    particle: Option<Particle>,
}

/// Arena of live particles addressed by generational handles
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl ParticleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle and return its handle
    pub fn insert(&mut self, particle: Particle) -> ParticleId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.particle = Some(particle);
                return ParticleId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            particle: Some(particle),
        });
        ParticleId {
            index,
            generation: 0,
        }
    }

    /// Resolve a handle, returning `None` for stale handles
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.particle.as_ref())
    }

    /// Resolve a handle mutably, returning `None` for stale handles
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.particle.as_mut())
    }

    /// Whether the handle still refers to a live particle
    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a particle, invalidating its handle
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let particle = slot.particle.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(particle)
    }

    /// Remove every particle whose slot bit is set, returning how many were removed
    pub fn remove_marked(&mut self, marked: &BitSlice) -> usize {
        let ids: Vec<ParticleId> = marked
            .iter_ones()
            .filter_map(|index| {
                self.slots.get(index).and_then(|slot| {
                    slot.particle.as_ref().map(|_| ParticleId {
                        index,
                        generation: slot.generation,
                    })
                })
            })
            .collect();

        ids.into_iter()
            .filter(|&id| self.remove(id).is_some())
            .count()
    }

    /// Number of slots ever allocated, live or free
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Whether no particles are live
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate live particles with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle.as_ref().map(|particle| {
                (
                    ParticleId {
                        index,
                        generation: slot.generation,
                    },
                    particle,
                )
            })
        })
    }

    /// Handles of every live particle, in slot order
    pub fn ids(&self) -> Vec<ParticleId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Remove every particle, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.particle.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.live = 0;
    }
}
