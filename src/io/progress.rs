//! Terminal progress display for stroke replay and the morph phase

use crate::analysis::statistics::{Statistics, StatisticsObserver};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static DRAWING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} drawing  [{bar:30.cyan/blue}] {pos}/{len} strokes")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static MORPH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} morphing [{bar:30.green/blue}] {pos}/{len} settled {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar for one target image
///
/// Shows replayed strokes while drawing, then settled over total particles
/// while morphing.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress manager; it appears on [`Self::start_file`]
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show a fresh bar for `path` covering `stroke_count` strokes
    pub fn start_file(&mut self, path: &Path, stroke_count: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let name_width = usize::from(PROGRESS_BAR_WIDTH / 2);
        self.bar = ProgressBar::new(stroke_count as u64);
        self.bar.set_style(DRAWING_STYLE.clone());
        self.bar.set_prefix(format!("{display_name:<name_width$}"));
    }

    /// Count one replayed stroke
    pub fn stroke_done(&self) {
        self.bar.inc(1);
    }

    /// Switch the bar to settled/total particle counts
    pub fn begin_morph(&self, statistics: Statistics) {
        self.bar.set_style(MORPH_STYLE.clone());
        self.bar.set_length(statistics.total as u64);
        self.bar.set_position(statistics.settled as u64);
    }

    /// Mark the current file as completed
    pub fn complete_file(&self) {
        self.bar.finish();
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl StatisticsObserver for ProgressManager {
    fn observe(&mut self, frame: u64, statistics: Statistics) {
        self.bar.set_length(statistics.total as u64);
        self.bar.set_position(statistics.settled as u64);
        self.bar.set_message(format!("frame {frame}"));
    }
}
