//! Engine constants and runtime configuration defaults

// Assignment engine
/// Number of uniform pool draws per assignment call
pub const SAMPLE_COUNT: usize = 40;
/// Penalty added to candidates whose cell already has an occupant
pub const OCCUPIED_PENALTY: f64 = 1000.0;
/// A takeover needs the candidate color distance below this fraction of the occupant's
pub const TAKEOVER_MARGIN: f64 = 0.9;
/// Scale of the priority term `PRIORITY_SCALE / (1 + feature_score)`
pub const PRIORITY_SCALE: f64 = 10.0;
/// Chance of substituting the cell's native color when fidelity bias is on
pub const NATIVE_COLOR_PROBABILITY: f64 = 0.5;

// Particle creation
/// Upper bound of the random arrival delay, in frames
pub const MAX_ARRIVAL_DELAY: f64 = 150.0;
/// Band for the per-particle spring coefficient
pub const EASE_RANGE: (f64, f64) = (0.01, 0.03);
/// Band for the per-particle velocity damping factor
pub const FRICTION_RANGE: (f64, f64) = (0.85, 0.92);
/// Symmetric bound for each component of the initial velocity
pub const INITIAL_VELOCITY: f64 = 0.5;
/// Side length of the square drawn for every particle
pub const PARTICLE_SIZE: u32 = 3;

// Motion model
/// Distance below which a particle snaps onto its target
pub const SNAP_THRESHOLD: f64 = 0.5;
/// Distance below which no noise is injected
pub const NOISE_CUTOFF: f64 = 2.0;
/// Distance at which noise reaches full strength
pub const NOISE_FALLOFF: f64 = 100.0;

// Target pool builder
/// Minimum alpha for a raster cell to become a target
pub const ALPHA_THRESHOLD: u8 = 128;
/// Brightness above which a cell receives the flat bonus
pub const BRIGHTNESS_BONUS_THRESHOLD: f64 = 200.0;
/// Flat score bonus for bright cells
pub const BRIGHTNESS_BONUS: f64 = 20.0;
/// Fraction of image height where the vertical weight peaks
pub const VERTICAL_PEAK: f64 = 0.4;
/// Cells skipped along each raster edge so neighbors always exist
pub const SAMPLING_BORDER: u32 = 1;

// Strokes and phases
/// Radius of the disc that stroke points are jittered within
pub const STROKE_JITTER_RADIUS: f64 = 8.0;
/// Frames of drawing inactivity before the morph phase begins
pub const QUIESCENCE_DELAY_FRAMES: u64 = 45;
/// Opacity of the background wash applied each frame
pub const FADE_ALPHA: f64 = 0.2;
/// Background color of the drawing surface
pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

// Default values for configurable parameters
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 400;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;
/// Default sampling stride (resolution setting)
pub const DEFAULT_STRIDE: u32 = 4;
/// Default particles created per stroke event
pub const DEFAULT_DENSITY: usize = 5;
/// Fixed seed for reproducible runs
pub const DEFAULT_SEED: u64 = 42;
/// Default frame limit for the morph phase
pub const DEFAULT_MAX_FRAMES: u64 = 3000;
/// Default number of random scribbles when no sketch is given
pub const DEFAULT_SCRIBBLES: usize = 60;
/// Points per generated scribble
pub const SCRIBBLE_LENGTH: usize = 40;
/// Default spacing between sampled sketch pixels
pub const DEFAULT_SKETCH_STRIDE: u32 = 6;

// Progress bar display settings
/// Width budget of the progress line label, in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_pointillized";
/// Suffix added to animation filenames
pub const ANIMATION_SUFFIX: &str = "_morph";
/// Frames between captured animation snapshots
pub const CAPTURE_INTERVAL: u64 = 10;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Snapshots held in memory before the capture thins itself to half
pub const MAX_CAPTURED_SNAPSHOTS: usize = 100;

/// Tunable engine parameters, defaulting to the constants above
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Pool draws per assignment
    pub sample_count: usize,
    /// Penalty for occupied candidates
    pub occupied_penalty: f64,
    /// Required improvement ratio for a takeover
    pub takeover_margin: f64,
    /// Weight of the feature-score priority term
    pub priority_scale: f64,
    /// Substitute the cell's native color with `native_color_probability`
    pub fidelity_bias: bool,
    /// Probability used when `fidelity_bias` is enabled
    pub native_color_probability: f64,
    /// Upper bound of the arrival delay in frames
    pub max_arrival_delay: f64,
    /// Spring coefficient band
    pub ease_range: (f64, f64),
    /// Damping factor band
    pub friction_range: (f64, f64),
    /// Initial velocity bound
    pub initial_velocity: f64,
    /// Snap distance
    pub snap_threshold: f64,
    /// Noise suppression distance
    pub noise_cutoff: f64,
    /// Noise full-strength distance
    pub noise_falloff: f64,
    /// Minimum alpha for target cells
    pub alpha_threshold: u8,
    /// Brightness bonus threshold
    pub brightness_bonus_threshold: f64,
    /// Brightness bonus
    pub brightness_bonus: f64,
    /// Vertical weight peak as a fraction of height
    pub vertical_peak: f64,
    /// Stroke jitter disc radius
    pub jitter_radius: f64,
    /// Frames of quiet before morphing starts
    pub quiescence_delay: u64,
    /// Particle square size
    pub particle_size: u32,
    /// Per-frame background wash opacity
    pub fade_alpha: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            occupied_penalty: OCCUPIED_PENALTY,
            takeover_margin: TAKEOVER_MARGIN,
            priority_scale: PRIORITY_SCALE,
            fidelity_bias: false,
            native_color_probability: NATIVE_COLOR_PROBABILITY,
            max_arrival_delay: MAX_ARRIVAL_DELAY,
            ease_range: EASE_RANGE,
            friction_range: FRICTION_RANGE,
            initial_velocity: INITIAL_VELOCITY,
            snap_threshold: SNAP_THRESHOLD,
            noise_cutoff: NOISE_CUTOFF,
            noise_falloff: NOISE_FALLOFF,
            alpha_threshold: ALPHA_THRESHOLD,
            brightness_bonus_threshold: BRIGHTNESS_BONUS_THRESHOLD,
            brightness_bonus: BRIGHTNESS_BONUS,
            vertical_peak: VERTICAL_PEAK,
            jitter_radius: STROKE_JITTER_RADIUS,
            quiescence_delay: QUIESCENCE_DELAY_FRAMES,
            particle_size: PARTICLE_SIZE,
            fade_alpha: FADE_ALPHA,
        }
    }
}
