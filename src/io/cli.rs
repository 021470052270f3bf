//! Command-line interface replaying strokes onto target images

use crate::algorithm::driver::Animator;
use crate::analysis::statistics::StatisticsObserver;
use crate::io::configuration::{
    ANIMATION_SUFFIX, BACKGROUND, CAPTURE_INTERVAL, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_DENSITY, DEFAULT_MAX_FRAMES, DEFAULT_SCRIBBLES, DEFAULT_SEED, DEFAULT_SKETCH_STRIDE,
    DEFAULT_STRIDE, EngineConfig, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, SCRIBBLE_LENGTH,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_png, fit_to_canvas, load_raster};
use crate::io::progress::ProgressManager;
use crate::io::strokes::{Stroke, random_scribbles, strokes_from_sketch};
use crate::io::surface::FrameSurface;
use crate::io::visualization::VisualizationCapture;
use crate::math::random::RandomSource;
use clap::Parser;
use image::Rgba;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pointillize")]
#[command(
    author,
    version,
    about = "Morph freely drawn marks into a pointillist copy of a target image"
)]
/// Command-line arguments for the replay tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Target PNG file or directory of PNG files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Sketch image whose visible pixels are replayed as strokes
    #[arg(short = 'k', long)]
    pub sketch: Option<PathBuf>,

    /// Spacing between sampled sketch pixels
    #[arg(long, default_value_t = DEFAULT_SKETCH_STRIDE)]
    pub sketch_stride: u32,

    /// Random scribbles to draw when no sketch is given
    #[arg(short = 'n', long, default_value_t = DEFAULT_SCRIBBLES)]
    pub scribbles: usize,

    /// Target sampling stride (lower is finer)
    #[arg(short = 'r', long, default_value_t = DEFAULT_STRIDE)]
    pub stride: u32,

    /// Marks deposited per stroke event
    #[arg(short, long, default_value_t = DEFAULT_DENSITY)]
    pub density: usize,

    /// Canvas width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: u32,

    /// Random seed for reproducible runs
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Frame limit for the morph phase
    #[arg(short, long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub frames: u64,

    /// Bias marks toward the target image's own colors
    #[arg(long)]
    pub fidelity: bool,

    /// Export the morph as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine parameters implied by the flags
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fidelity_bias: self.fidelity,
            ..EngineConfig::default()
        }
    }

    /// Reject flag values the engine can't run with
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is empty or a stride is zero
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.width, self.height),
                &"both dimensions must be positive",
            ));
        }
        if self.stride == 0 {
            return Err(invalid_parameter("stride", &self.stride, &"must be at least 1"));
        }
        if self.sketch_stride == 0 {
            return Err(invalid_parameter(
                "sketch_stride",
                &self.sketch_stride,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Orchestrates stroke replay and morphing for each target file
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, target discovery or file processing fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.validate()?;
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn load_strokes(&self, rng: &mut RandomSource) -> Result<Vec<Stroke>> {
        let config = self.cli.engine_config();
        match &self.cli.sketch {
            Some(sketch_path) => {
                let sketch = load_raster(sketch_path)?;
                let fitted = fit_to_canvas(&sketch, self.cli.width, self.cli.height);
                strokes_from_sketch(
                    &fitted,
                    self.cli.sketch_stride,
                    self.cli.density,
                    config.alpha_threshold,
                )
            }
            None => Ok(random_scribbles(
                self.cli.width,
                self.cli.height,
                self.cli.scribbles,
                SCRIBBLE_LENGTH,
                self.cli.density,
                rng,
            )),
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let mut animator = Animator::new(
            self.cli.width,
            self.cli.height,
            self.cli.engine_config(),
            self.cli.seed,
        );
        animator.rebuild_from_path(input_path, self.cli.stride)?;
        animator.start();

        let mut stroke_rng = RandomSource::new(self.cli.seed.wrapping_add(1));
        let strokes = self.load_strokes(&mut stroke_rng)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, strokes.len());
        }

        let mut surface = FrameSurface::new(self.cli.width, self.cli.height, Rgba(BACKGROUND));
        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(CAPTURE_INTERVAL, GIF_FRAME_DELAY_MS));

        for stroke in &strokes {
            animator.begin_stroke();
            for event in stroke {
                animator.stroke(event);
                Self::advance_frame(&mut animator, &mut surface, capture.as_mut());
            }
            animator.end_stroke();
            if let Some(ref pm) = self.progress_manager {
                pm.stroke_done();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.begin_morph(animator.statistics());
        }

        let frame_limit = animator.frame().saturating_add(self.cli.frames);
        while animator.frame() < frame_limit {
            Self::advance_frame(&mut animator, &mut surface, capture.as_mut());
            let statistics = animator.statistics();
            if let Some(ref mut pm) = self.progress_manager {
                pm.observe(animator.frame(), statistics);
            }
            if statistics.is_complete() && (animator.is_morphing() || statistics.total == 0) {
                break;
            }
        }

        let statistics = animator.statistics();
        info!(
            "{}: {} of {} particles settled after {} frames",
            input_path.display(),
            statistics.settled,
            statistics.total,
            animator.frame()
        );

        export_png(surface.image(), &Self::get_output_path(input_path))?;

        if let Some(mut capture) = capture {
            capture.record_final(animator.frame(), surface.image());
            capture.export_gif(&Self::get_visualization_path(input_path))?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn advance_frame(
        animator: &mut Animator,
        surface: &mut FrameSurface,
        capture: Option<&mut VisualizationCapture>,
    ) {
        if let Some(report) = animator.tick() {
            animator.render(surface);
            if let Some(capture) = capture {
                capture.record(report.frame, surface.image());
            }
        }
    }

    /// Path of the rendered result for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Path of the morph animation for `input_path`
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, ANIMATION_SUFFIX, "gif")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

fn sibling_with_suffix(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
