//! Tests for particle creation, spring motion, snapping and retargeting

#[cfg(test)]
mod tests {
    use image::Rgba;
    use pointillize::algorithm::motion::{Motion, advance, retarget, spawn};
    use pointillize::io::configuration::EngineConfig;
    use pointillize::math::random::RandomSource;
    use pointillize::spatial::particles::Particle;

    fn moving_particle(position: [f64; 2], target: [i32; 2]) -> Particle {
        Particle {
            position,
            target,
            velocity: [0.0, 0.0],
            color: Rgba([0, 0, 0, 255]),
            arrival_delay: 0.0,
            is_settled: false,
            ease_rate: 0.02,
            friction_rate: 0.9,
            replaces: None,
            cell: None,
        }
    }

    // Tests spawned particles draw their dynamics from the configured bands
    // Verified by swapping the ease and friction bands
    #[test]
    fn test_spawn_randomized_within_bands() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(21);
        for _ in 0..100 {
            let p = spawn([5.0, 5.0], [9, 9], None, Rgba([1, 2, 3, 255]), &config, &mut rng);
            assert_eq!(p.position, [5.0, 5.0]);
            assert_eq!(p.target, [9, 9]);
            assert!(!p.is_settled);
            assert!(p.replaces.is_none());
            assert!((0.0..=config.max_arrival_delay).contains(&p.arrival_delay));
            assert!((config.ease_range.0..=config.ease_range.1).contains(&p.ease_rate));
            assert!((config.friction_range.0..=config.friction_range.1).contains(&p.friction_rate));
            assert!(p.velocity.iter().all(|v| v.abs() <= config.initial_velocity));
        }
    }

    // Tests particles wait out their arrival delay
    // Verified by ignoring the delay
    #[test]
    fn test_waits_for_arrival_delay() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(1);
        let mut particle = moving_particle([0.0, 0.0], [50, 50]);
        particle.arrival_delay = 30.0;

        assert_eq!(advance(&mut particle, 29.0, &config, &mut rng), Motion::Waiting);
        assert_eq!(particle.position, [0.0, 0.0]);
        assert_eq!(advance(&mut particle, 30.0, &config, &mut rng), Motion::Moving);
        assert_ne!(particle.position, [0.0, 0.0]);
    }

    // Tests convergence ends in an exact snap with zero velocity
    // Verified by removing the snap step
    #[test]
    fn test_converges_and_snaps() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(99);
        let mut particle = moving_particle([180.0, 20.0], [40, 120]);

        let mut settled_at = None;
        for frame in 0..5000 {
            if advance(&mut particle, f64::from(frame), &config, &mut rng) == Motion::Settled {
                settled_at = Some(frame);
                break;
            }
        }

        assert!(settled_at.is_some(), "particle never settled");
        assert!(particle.is_settled);
        assert_eq!(particle.position, [40.0, 120.0]);
        assert_eq!(particle.velocity, [0.0, 0.0]);
    }

    // Tests settled particles stay pinned
    // Verified by integrating settled particles
    #[test]
    fn test_settled_particle_stays_pinned() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(4);
        let mut particle = moving_particle([10.2, 10.1], [10, 10]);

        assert_eq!(advance(&mut particle, 0.0, &config, &mut rng), Motion::Settled);
        for frame in 1..100 {
            assert_eq!(
                advance(&mut particle, f64::from(frame), &config, &mut rng),
                Motion::AlreadySettled
            );
            assert_eq!(particle.position, [10.0, 10.0]);
            assert_eq!(particle.velocity, [0.0, 0.0]);
        }
    }

    // Tests no noise is injected close to the target
    // Verified by applying noise at every distance
    #[test]
    fn test_noise_suppressed_near_target() {
        let config = EngineConfig::default();
        let mut a = moving_particle([11.5, 10.0], [10, 10]);
        let mut b = a.clone();

        advance(&mut a, 0.0, &config, &mut RandomSource::new(1));
        advance(&mut b, 0.0, &config, &mut RandomSource::new(2));
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }

    // Tests distance shrinks on average over windows of frames
    // Verified by flipping the sign of the spring term
    #[test]
    fn test_distance_non_increasing_over_windows() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(17);
        let mut improved = 0;
        let trials = 50;

        for trial in 0..trials {
            let mut particle = spawn(
                [f64::from(trial) * 7.0, 300.0],
                [200, 40],
                None,
                Rgba([0, 0, 0, 255]),
                &config,
                &mut rng,
            );
            particle.arrival_delay = 0.0;
            let start = particle.distance_to_target();
            for frame in 0..20 {
                advance(&mut particle, f64::from(frame), &config, &mut rng);
            }
            assert!(particle.distance_to_target() >= 0.0);
            if particle.distance_to_target() <= start {
                improved += 1;
            }
        }

        assert!(improved * 10 >= trials * 9, "only {improved}/{trials} improved");
    }

    // Tests retargeting clears settle state and redraws dynamics
    // Verified by leaving is_settled untouched
    #[test]
    fn test_retarget_restarts_approach() {
        let config = EngineConfig::default();
        let mut rng = RandomSource::new(8);
        let mut particle = moving_particle([10.0, 10.0], [10, 10]);
        particle.is_settled = true;

        retarget(
            &mut particle,
            [30, 40],
            None,
            Rgba([9, 9, 9, 255]),
            12.0,
            &config,
            &mut rng,
        );

        assert!(!particle.is_settled);
        assert_eq!(particle.target, [30, 40]);
        assert_eq!(particle.color, Rgba([9, 9, 9, 255]));
        assert!((particle.arrival_delay - 12.0).abs() < f64::EPSILON);
        assert_eq!(particle.position, [10.0, 10.0]);
        assert!((config.ease_range.0..=config.ease_range.1).contains(&particle.ease_rate));
        assert_eq!(advance(&mut particle, 0.0, &config, &mut rng), Motion::Waiting);
    }
}
