//! Feature scoring of raster cells
//!
//! A cell's score is its local contrast weighted toward the upper-middle band
//! of the image, plus a flat bonus for bright cells. Sorting the pool by this
//! score puts edges and facial detail at the front.

use crate::io::configuration::EngineConfig;
use crate::math::color::brightness;
use image::{Pixel, RgbaImage};
use ndarray::Array2;

/// Per-cell brightness indexed `[row, col]`
pub fn brightness_map(raster: &RgbaImage) -> Array2<f64> {
    let (width, height) = raster.dimensions();
    let mut map = Array2::zeros((height as usize, width as usize));
    for (x, y, pixel) in raster.enumerate_pixels() {
        if let Some(value) = map.get_mut([y as usize, x as usize]) {
            *value = brightness(pixel.to_rgb());
        }
    }
    map
}

/// Weight peaking at `peak` (fraction of height) and falling off linearly
pub fn vertical_weight(y: u32, height: u32, peak: f64) -> f64 {
    if height == 0 {
        return 0.0;
    }
    let relative = f64::from(y) / f64::from(height);
    (1.0 - (relative - peak).abs()).max(0.0)
}

/// Sum of absolute horizontal and vertical neighbor brightness differences
///
/// Neighbors outside the map contribute the center value, so border cells
/// only see the contrast that actually exists.
pub fn local_contrast(map: &Array2<f64>, x: u32, y: u32) -> f64 {
    let (row, col) = (y as usize, x as usize);
    let center = map.get([row, col]).copied().unwrap_or(0.0);
    let at = |r: Option<usize>, c: Option<usize>| {
        r.zip(c)
            .and_then(|(r, c)| map.get([r, c]).copied())
            .unwrap_or(center)
    };

    let left = at(Some(row), col.checked_sub(1));
    let right = at(Some(row), col.checked_add(1));
    let up = at(row.checked_sub(1), Some(col));
    let down = at(row.checked_add(1), Some(col));

    (left - right).abs() + (up - down).abs()
}

/// Priority score of the cell at `(x, y)`
pub fn feature_score(map: &Array2<f64>, x: u32, y: u32, config: &EngineConfig) -> f64 {
    let height = map.nrows() as u32;
    let contrast = local_contrast(map, x, y) * vertical_weight(y, height, config.vertical_peak);
    let center = map.get([y as usize, x as usize]).copied().unwrap_or(0.0);
    if center > config.brightness_bonus_threshold {
        contrast + config.brightness_bonus
    } else {
        contrast
    }
}
