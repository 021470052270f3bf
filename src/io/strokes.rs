//! Stroke sources standing in for pointer input
//!
//! A stroke is the ordered list of events reported between pointer down and
//! pointer up. Strokes are read from a sketch image or generated as seeded
//! random scribbles.

use crate::io::error::{Result, invalid_parameter};
use crate::math::random::RandomSource;
use image::{Rgba, RgbaImage};

/// One reported pointer position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeEvent {
    /// Reported position in canvas coordinates
    pub point: [f64; 2],
    /// Brush color
    pub color: Rgba<u8>,
    /// Marks to deposit around `point`
    pub density: usize,
}

/// Events reported between pointer down and pointer up
pub type Stroke = Vec<StrokeEvent>;

/// Colors used for generated scribbles
pub const SCRIBBLE_PALETTE: [[u8; 4]; 8] = [
    [20, 20, 20, 255],
    [230, 57, 70, 255],
    [241, 250, 238, 255],
    [69, 123, 157, 255],
    [29, 53, 87, 255],
    [244, 162, 97, 255],
    [42, 157, 143, 255],
    [233, 196, 106, 255],
];

/// Points jittered uniformly inside the disc of `radius` around the event
pub fn jittered_points(event: &StrokeEvent, radius: f64, rng: &mut RandomSource) -> Vec<[f64; 2]> {
    (0..event.density)
        .map(|_| rng.point_in_disc(event.point, radius))
        .collect()
}

/// Read strokes from a sketch image
///
/// Visible pixels on a `stride` grid become events carrying their own color.
/// Each horizontal run of visible samples forms one stroke.
///
/// # Errors
///
/// Returns an error if `stride` is zero
pub fn strokes_from_sketch(
    sketch: &RgbaImage,
    stride: u32,
    density: usize,
    alpha_threshold: u8,
) -> Result<Vec<Stroke>> {
    if stride == 0 {
        return Err(invalid_parameter(
            "sketch_stride",
            &stride,
            &"must be at least 1",
        ));
    }

    let (width, height) = sketch.dimensions();
    let mut strokes = Vec::new();

    for y in (0..height).step_by(stride as usize) {
        let mut current: Stroke = Vec::new();
        for x in (0..width).step_by(stride as usize) {
            let pixel = *sketch.get_pixel(x, y);
            if pixel.0[3] > alpha_threshold {
                current.push(StrokeEvent {
                    point: [f64::from(x), f64::from(y)],
                    color: pixel,
                    density,
                });
            } else if !current.is_empty() {
                strokes.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            strokes.push(current);
        }
    }

    Ok(strokes)
}

/// Generate `count` random-walk scribbles of `length` events each
pub fn random_scribbles(
    width: u32,
    height: u32,
    count: usize,
    length: usize,
    density: usize,
    rng: &mut RandomSource,
) -> Vec<Stroke> {
    let max_x = f64::from(width.saturating_sub(1));
    let max_y = f64::from(height.saturating_sub(1));

    (0..count)
        .map(|_| {
            let color = rng
                .index(SCRIBBLE_PALETTE.len())
                .and_then(|i| SCRIBBLE_PALETTE.get(i))
                .map_or(Rgba([0, 0, 0, 255]), |&c| Rgba(c));
            let mut point = [rng.uniform(0.0, max_x), rng.uniform(0.0, max_y)];
            let mut heading = rng.uniform(0.0, std::f64::consts::TAU);

            (0..length)
                .map(|_| {
                    let event = StrokeEvent {
                        point,
                        color,
                        density,
                    };
                    heading += rng.symmetric(0.6);
                    let step = rng.uniform(2.0, 8.0);
                    point = [
                        step.mul_add(heading.cos(), point[0]).clamp(0.0, max_x),
                        step.mul_add(heading.sin(), point[1]).clamp(0.0, max_y),
                    ];
                    event
                })
                .collect()
        })
        .collect()
}
