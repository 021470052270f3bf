//! Target cells derived from the source image
//!
//! The pool is an arena of cells addressed by index. Occupancy is stored as a
//! particle handle on the cell, and every rebuild bumps the pool epoch so
//! [`CellRef`]s issued against an older pool can be recognized as stale.

use crate::analysis::features::{brightness_map, feature_score};
use crate::io::configuration::{EngineConfig, SAMPLING_BORDER};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::particles::{CellRef, ParticleId};
use image::{Pixel, Rgb, RgbaImage};
use log::info;

/// A candidate destination slot
#[derive(Clone, Debug, PartialEq)]
pub struct TargetCell {
    /// Grid position `[x, y]` in canvas coordinates
    pub position: [i32; 2],
    /// Native color of the source image at this position
    pub color: Rgb<u8>,
    /// Priority of this cell, higher is more important
    pub feature_score: f64,
    occupant: Option<ParticleId>,
}

impl TargetCell {
    /// Create an unoccupied cell
    pub const fn new(position: [i32; 2], color: Rgb<u8>, feature_score: f64) -> Self {
        Self {
            position,
            color,
            feature_score,
            occupant: None,
        }
    }

    /// Particle currently bound to this cell
    pub const fn occupant(&self) -> Option<ParticleId> {
        self.occupant
    }

    /// Whether a particle is bound to this cell
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Priority-ordered collection of target cells
#[derive(Clone, Debug, Default)]
pub struct TargetPool {
    cells: Vec<TargetCell>,
    epoch: u64,
    stride: u32,
}

impl TargetPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool directly from cells, sorted by descending score
    pub fn from_cells(mut cells: Vec<TargetCell>) -> Self {
        sort_by_priority(&mut cells);
        Self {
            cells,
            epoch: 1,
            stride: 1,
        }
    }

    /// Build a fresh pool from `raster`
    ///
    /// # Errors
    ///
    /// Returns an error if `stride` is zero
    pub fn build(raster: &RgbaImage, stride: u32, config: &EngineConfig) -> Result<Self> {
        let mut pool = Self::new();
        pool.rebuild(raster, stride, config)?;
        Ok(pool)
    }

    /// Sample `raster` on a `stride` grid and return cells sorted by descending score
    ///
    /// # Errors
    ///
    /// Returns an error if `stride` is zero
    pub fn build_cells(
        raster: &RgbaImage,
        stride: u32,
        config: &EngineConfig,
    ) -> Result<Vec<TargetCell>> {
        if stride == 0 {
            return Err(invalid_parameter("stride", &stride, &"must be at least 1"));
        }

        let (width, height) = raster.dimensions();
        let map = brightness_map(raster);
        let mut cells = Vec::new();

        let x_end = width.saturating_sub(SAMPLING_BORDER);
        let y_end = height.saturating_sub(SAMPLING_BORDER);

        for y in (SAMPLING_BORDER..y_end).step_by(stride as usize) {
            for x in (SAMPLING_BORDER..x_end).step_by(stride as usize) {
                let pixel = raster.get_pixel(x, y);
                if pixel.0[3] <= config.alpha_threshold {
                    continue;
                }
                cells.push(TargetCell::new(
                    [x as i32, y as i32],
                    pixel.to_rgb(),
                    feature_score(&map, x, y, config),
                ));
            }
        }

        sort_by_priority(&mut cells);
        Ok(cells)
    }

    /// Replace every cell with a fresh sampling of `raster`
    ///
    /// Occupancy is dropped and the epoch advances, so references held by
    /// existing particles become stale. On error the pool is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `stride` is zero
    pub fn rebuild(&mut self, raster: &RgbaImage, stride: u32, config: &EngineConfig) -> Result<()> {
        let cells = Self::build_cells(raster, stride, config)?;
        self.cells = cells;
        self.epoch += 1;
        self.stride = stride;
        info!(
            "target pool rebuilt: {} cells at stride {stride} (epoch {})",
            self.cells.len(),
            self.epoch
        );
        Ok(())
    }

    /// All cells in priority order
    pub fn cells(&self) -> &[TargetCell] {
        &self.cells
    }

    /// Cell at `index`
    pub fn cell(&self, index: usize) -> Option<&TargetCell> {
        self.cells.get(index)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pool has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rebuild counter, starting at zero for a never-built pool
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Stride of the most recent build
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Occupant of the cell at `index`
    pub fn occupant(&self, index: usize) -> Option<ParticleId> {
        self.cells.get(index).and_then(TargetCell::occupant)
    }

    /// Bind or unbind the occupant of the cell at `index`
    pub fn set_occupant(&mut self, index: usize, occupant: Option<ParticleId>) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.occupant = occupant;
        }
    }

    /// Unbind every cell
    pub fn clear_occupancy(&mut self) {
        for cell in &mut self.cells {
            cell.occupant = None;
        }
    }

    /// Reference to the cell at `index` in the current epoch
    pub const fn reference(&self, index: usize) -> CellRef {
        CellRef {
            index,
            epoch: self.epoch,
        }
    }

    /// Whether `cell` was issued against the current pool
    pub fn is_current(&self, cell: CellRef) -> bool {
        cell.epoch == self.epoch && cell.index < self.cells.len()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }
}

fn sort_by_priority(cells: &mut [TargetCell]) {
    cells.sort_by(|a, b| b.feature_score.total_cmp(&a.feature_score));
}
