//! Tests for deferred incumbent removal

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba, RgbaImage};
    use pointillize::algorithm::assignment::{Assignment, assign};
    use pointillize::algorithm::replacement::ReplacementCoordinator;
    use pointillize::io::configuration::EngineConfig;
    use pointillize::math::random::RandomSource;
    use pointillize::spatial::particles::{ParticleId, ParticleStore};
    use pointillize::spatial::pool::{TargetCell, TargetPool};

    struct Duel {
        pool: TargetPool,
        particles: ParticleStore,
        incumbent: ParticleId,
        challenger: ParticleId,
    }

    fn duel() -> Duel {
        let config = EngineConfig::default();
        let mut pool =
            TargetPool::from_cells(vec![TargetCell::new([2, 2], Rgb([255, 0, 0]), 0.0)]);
        let mut particles = ParticleStore::new();
        let mut rng = RandomSource::new(11);

        let Assignment::Claimed(incumbent) = assign(
            &mut pool,
            &mut particles,
            [2.0, 2.0],
            Rgba([0, 0, 255, 255]),
            &config,
            &mut rng,
        ) else {
            panic!("expected a claim");
        };
        particles.get_mut(incumbent).expect("live").is_settled = true;

        let Assignment::Challenged { challenger, .. } = assign(
            &mut pool,
            &mut particles,
            [2.0, 2.0],
            Rgba([255, 0, 0, 255]),
            &config,
            &mut rng,
        ) else {
            panic!("expected a challenge");
        };
        particles.get_mut(challenger).expect("live").is_settled = true;

        Duel {
            pool,
            particles,
            incumbent,
            challenger,
        }
    }

    // Tests the incumbent is marked, kept until applied, then removed
    // Verified by removing the incumbent inside observe_settled
    #[test]
    fn test_removal_is_deferred() {
        let mut duel = duel();
        let mut coordinator = ReplacementCoordinator::new();

        let marked = coordinator.observe_settled(&mut duel.particles, &duel.pool, duel.challenger);
        assert_eq!(marked, Some(duel.incumbent));
        assert!(coordinator.is_marked(duel.incumbent));
        assert!(!coordinator.is_marked(duel.challenger));
        assert_eq!(coordinator.pending_removals(), 1);
        assert!(duel.particles.contains(duel.incumbent));

        assert_eq!(coordinator.apply_removals(&mut duel.particles), 1);
        assert!(!duel.particles.contains(duel.incumbent));
        assert!(duel.particles.contains(duel.challenger));
        assert_eq!(coordinator.pending_removals(), 0);
        let challenger = duel.particles.get(duel.challenger).expect("live");
        assert!(challenger.replaces.is_none());
    }

    // Tests particles without a link are ignored
    // Verified by marking the settled particle itself
    #[test]
    fn test_plain_particle_marks_nothing() {
        let mut duel = duel();
        let mut coordinator = ReplacementCoordinator::new();

        assert_eq!(
            coordinator.observe_settled(&mut duel.particles, &duel.pool, duel.incumbent),
            None
        );
        assert_eq!(coordinator.pending_removals(), 0);
        assert_eq!(coordinator.apply_removals(&mut duel.particles), 0);
        assert_eq!(duel.particles.len(), 2);
    }

    // Tests a link into an older pool is dropped without removing anything
    // Verified by skipping the epoch check
    #[test]
    fn test_stale_link_abandoned_after_rebuild() {
        let mut duel = duel();
        let mut coordinator = ReplacementCoordinator::new();
        let raster = RgbaImage::from_pixel(5, 5, Rgba([255, 0, 0, 255]));
        duel.pool
            .rebuild(&raster, 1, &EngineConfig::default())
            .expect("stride is valid");

        assert_eq!(
            coordinator.observe_settled(&mut duel.particles, &duel.pool, duel.challenger),
            None
        );
        assert_eq!(coordinator.pending_removals(), 0);
        assert!(duel.particles.contains(duel.incumbent));
        let challenger = duel.particles.get(duel.challenger).expect("live");
        assert!(challenger.replaces.is_none());
    }

    // Tests an incumbent that is already gone is not marked
    // Verified by marking dead handles
    #[test]
    fn test_missing_incumbent_is_ignored() {
        let mut duel = duel();
        let mut coordinator = ReplacementCoordinator::new();
        duel.particles.remove(duel.incumbent);

        assert_eq!(
            coordinator.observe_settled(&mut duel.particles, &duel.pool, duel.challenger),
            None
        );
        assert_eq!(coordinator.pending_removals(), 0);
    }
}
