//! Tests for particles and the generational particle store

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use image::Rgba;
    use pointillize::spatial::particles::{Particle, ParticleStore};

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle {
            position: [x, y],
            target: [10, 10],
            velocity: [0.0, 0.0],
            color: Rgba([0, 0, 255, 255]),
            arrival_delay: 0.0,
            is_settled: false,
            ease_rate: 0.02,
            friction_rate: 0.9,
            replaces: None,
            cell: None,
        }
    }

    // Tests distance and offset toward the target
    // Verified by swapping target and position in the offset
    #[test]
    fn test_distance_to_target() {
        let particle = particle_at(7.0, 6.0);
        assert_eq!(particle.offset_to_target(), [3.0, 4.0]);
        assert!((particle.distance_to_target() - 5.0).abs() < 1e-12);
    }

    // Tests insertion and lookup
    // Verified by returning the wrong slot index
    #[test]
    fn test_insert_and_get() {
        let mut store = ParticleStore::new();
        let a = store.insert(particle_at(1.0, 1.0));
        let b = store.insert(particle_at(2.0, 2.0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).map(|p| p.position), Some([1.0, 1.0]));
        assert_eq!(store.get(b).map(|p| p.position), Some([2.0, 2.0]));
    }

    // Tests handles go stale after removal even when the slot is reused
    // Verified by not bumping the generation on removal
    #[test]
    fn test_removed_handle_is_stale() {
        let mut store = ParticleStore::new();
        let a = store.insert(particle_at(1.0, 1.0));
        assert!(store.remove(a).is_some());
        assert!(!store.contains(a));
        assert!(store.remove(a).is_none());

        let b = store.insert(particle_at(3.0, 3.0));
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(store.get(a).is_none());
        assert!(store.contains(b));
    }

    // Tests marked slots are removed as a set difference
    // Verified by removing unmarked slots
    #[test]
    fn test_remove_marked() {
        let mut store = ParticleStore::new();
        let ids: Vec<_> = (0..4)
            .map(|i| store.insert(particle_at(f64::from(i), 0.0)))
            .collect();

        let mut marks = bitvec![0; store.slot_count()];
        for id in [ids[1], ids[3]] {
            marks.set(id.index(), true);
        }

        assert_eq!(store.remove_marked(&marks), 2);
        assert_eq!(store.len(), 2);
        assert!(store.contains(ids[0]));
        assert!(!store.contains(ids[1]));
        assert!(store.contains(ids[2]));
        assert!(!store.contains(ids[3]));
    }

    // Tests clearing invalidates every handle
    // Verified by leaving generations untouched in clear
    #[test]
    fn test_clear_invalidates_handles() {
        let mut store = ParticleStore::new();
        let a = store.insert(particle_at(0.0, 0.0));
        store.clear();

        assert!(store.is_empty());
        assert!(!store.contains(a));
        let b = store.insert(particle_at(0.0, 0.0));
        assert!(store.contains(b));
        assert_eq!(store.iter().count(), 1);
    }

    // Tests challenger flag follows the replaces link
    // Verified by always reporting false
    #[test]
    fn test_is_challenger() {
        let mut store = ParticleStore::new();
        let incumbent = store.insert(particle_at(0.0, 0.0));
        let mut challenger = particle_at(1.0, 1.0);
        assert!(!challenger.is_challenger());
        challenger.replaces = Some(incumbent);
        assert!(challenger.is_challenger());
    }
}
