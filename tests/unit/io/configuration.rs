//! Tests for engine constants and configuration defaults

#[cfg(test)]
mod tests {
    use pointillize::io::configuration::{
        EASE_RANGE, EngineConfig, FRICTION_RANGE, GIF_FRAME_DELAY_MS, NOISE_CUTOFF,
        NOISE_FALLOFF, OCCUPIED_PENALTY, SAMPLE_COUNT, SNAP_THRESHOLD, TAKEOVER_MARGIN,
        VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests defaults mirror the constants
    // Verified by changing one default field
    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_count, SAMPLE_COUNT);
        assert!((config.occupied_penalty - OCCUPIED_PENALTY).abs() < f64::EPSILON);
        assert!((config.takeover_margin - TAKEOVER_MARGIN).abs() < f64::EPSILON);
        assert_eq!(config.ease_range, EASE_RANGE);
        assert_eq!(config.friction_range, FRICTION_RANGE);
        assert!(!config.fidelity_bias);
    }

    // Tests the tuned bands are well formed
    // Verified by swapping band endpoints
    #[test]
    fn test_bands_are_ordered() {
        assert!(EASE_RANGE.0 < EASE_RANGE.1);
        assert!(FRICTION_RANGE.0 < FRICTION_RANGE.1);
        assert!(FRICTION_RANGE.1 < 1.0);
        assert!(SNAP_THRESHOLD < NOISE_CUTOFF);
        assert!(NOISE_CUTOFF < NOISE_FALLOFF);
        assert!(TAKEOVER_MARGIN < 1.0);
        assert!(GIF_FRAME_DELAY_MS <= VIEWER_MIN_FRAME_DELAY_MS);
    }
}
