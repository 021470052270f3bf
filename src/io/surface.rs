//! Rendering surface the animation driver paints onto

use crate::math::color::{alpha_factor, blend};
use image::{Rgba, RgbaImage};

/// Minimal drawing contract: a per-frame wash and filled squares
pub trait Surface {
    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Blend `color` over the whole surface with opacity `alpha`
    fn fade(&mut self, color: Rgba<u8>, alpha: f64);

    /// Fill a `size`-sided square with its top-left corner at `(x, y)`
    fn fill_rect(&mut self, x: i64, y: i64, size: u32, color: Rgba<u8>);
}

/// Surface backed by an in-memory RGBA image
#[derive(Clone, Debug)]
pub struct FrameSurface {
    image: RgbaImage,
}

impl FrameSurface {
    /// Create a surface filled with `background`
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    /// Current pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the surface and return its pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for FrameSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fade(&mut self, color: Rgba<u8>, alpha: f64) {
        if alpha >= 1.0 {
            for pixel in self.image.pixels_mut() {
                *pixel = color;
            }
            return;
        }
        for pixel in self.image.pixels_mut() {
            *pixel = blend(*pixel, color, alpha);
        }
    }

    fn fill_rect(&mut self, x: i64, y: i64, size: u32, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        let opacity = alpha_factor(color);
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + i64::from(size)).min(i64::from(width));
        let y_end = (y + i64::from(size)).min(i64::from(height));

        for py in y_start..y_end {
            for px in x_start..x_end {
                let pixel = self.image.get_pixel_mut(px as u32, py as u32);
                let mixed = blend(*pixel, color, opacity);
                *pixel = Rgba([mixed.0[0], mixed.0[1], mixed.0[2], 255]);
            }
        }
    }
}
