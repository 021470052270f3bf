//! Loading source rasters and exporting rendered frames

use crate::io::error::{EngineError, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Decode an image file into RGBA pixels
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| EngineError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Scale `source` to fit inside a `width`x`height` canvas, centered on transparency
///
/// Aspect ratio is preserved; uncovered canvas stays fully transparent so it
/// never yields target cells.
pub fn fit_to_canvas(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return canvas;
    }

    let scale = (f64::from(width) / f64::from(src_w)).min(f64::from(height) / f64::from(src_h));
    let scaled_w = ((f64::from(src_w) * scale).round() as u32).clamp(1, width);
    let scaled_h = ((f64::from(src_h) * scale).round() as u32).clamp(1, height);

    let scaled = if (scaled_w, scaled_h) == (src_w, src_h) {
        source.clone()
    } else {
        imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle)
    };

    let offset_x = i64::from((width - scaled_w) / 2);
    let offset_y = i64::from((height - scaled_h) / 2);
    imageops::replace(&mut canvas, &scaled, offset_x, offset_y);
    canvas
}

/// Decode an image file and fit it to the canvas
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_target(path: &Path, width: u32, height: u32) -> Result<RgbaImage> {
    let source = load_raster(path)?;
    Ok(fit_to_canvas(&source, width, height))
}

/// Save a rendered frame as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    image.save(output_path).map_err(|e| EngineError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
