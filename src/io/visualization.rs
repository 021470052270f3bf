//! Frame capture and GIF generation for morph visualization

use crate::io::configuration::{MAX_CAPTURED_SNAPSHOTS, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{EngineError, Result};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Captures periodic snapshots of the rendering surface
///
/// Frames a viewer would drop at the requested delay are never stored, and
/// once [`MAX_CAPTURED_SNAPSHOTS`] is exceeded every other snapshot is
/// discarded and the interval doubles, so memory stays bounded however long
/// the morph runs.
pub struct VisualizationCapture {
    snapshots: Vec<(u64, RgbaImage)>,
    interval: u64,
    frame_delay_ms: u32,
}

impl VisualizationCapture {
    /// Capture every `interval` frames for a GIF shown at `frame_delay_ms` per frame
    ///
    /// Delays below what viewers support widen the interval instead, keeping
    /// the apparent animation speed. An interval of 0 is treated as 1.
    pub fn new(interval: u64, frame_delay_ms: u32) -> Self {
        let requested = frame_delay_ms.max(1);
        let skip_factor = if requested < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(requested)
        } else {
            1
        };

        Self {
            snapshots: Vec::new(),
            interval: interval.max(1) * u64::from(skip_factor),
            frame_delay_ms: requested.max(VIEWER_MIN_FRAME_DELAY_MS),
        }
    }

    /// Store `image` if `frame` falls on the capture interval
    pub fn record(&mut self, frame: u64, image: &RgbaImage) -> bool {
        if frame % self.interval != 0 {
            return false;
        }
        self.snapshots.push((frame, image.clone()));
        if self.snapshots.len() > MAX_CAPTURED_SNAPSHOTS {
            self.thin();
        }
        true
    }

    /// Store `image` off the interval, used for the final frame
    pub fn record_final(&mut self, frame: u64, image: &RgbaImage) {
        if self.snapshots.last().is_some_and(|(last, _)| *last == frame) {
            return;
        }
        self.snapshots.push((frame, image.clone()));
    }

    /// Returns the total number of captured snapshots
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Frames between captured snapshots
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Delay written for each GIF frame
    pub const fn frame_delay_ms(&self) -> u32 {
        self.frame_delay_ms
    }

    fn thin(&mut self) {
        self.interval *= 2;
        let interval = self.interval;
        self.snapshots.retain(|(frame, _)| frame % interval == 0);
    }

    /// Encode the captured snapshots as a GIF, holding the last one longer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No snapshots were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(self, output_path: &Path) -> Result<()> {
        let Some((_, last)) = self.snapshots.last() else {
            return Err(EngineError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        };
        let held = last.clone();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| EngineError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let delay = Delay::from_numer_denom_ms(self.frame_delay_ms, 1);
        let hold = Delay::from_numer_denom_ms(self.frame_delay_ms * 25, 1);
        let frames = self
            .snapshots
            .into_iter()
            .map(|(_, snapshot)| Frame::from_parts(snapshot, 0, 0, delay))
            .chain(std::iter::once(Frame::from_parts(held, 0, 0, hold)));

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| EngineError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
