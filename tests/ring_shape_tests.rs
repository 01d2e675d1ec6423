use bevy_arbor::RingShape;

#[test]
fn test_seam_closure_invariant() {
    for seed in [0, 1, 42, 65535, u32::MAX] {
        for sides in [3, 8, 16, 32] {
            let shape = RingShape::compute(sides, 0.4, seed);
            assert_eq!(
                shape[0],
                shape[sides as usize],
                "Seam must close for seed {} with {} sides",
                seed,
                sides
            );
        }
    }
}

#[test]
fn test_shape_length_is_sides_plus_one() {
    let shape = RingShape::compute(12, 0.5, 99);
    assert_eq!(shape.len(), 13);
    assert_eq!(shape.num_sides(), 12);
    assert!(!shape.is_empty());
}

#[test]
fn test_same_seed_reproduces_shape() {
    let a = RingShape::compute(16, 0.8, 12345);
    let b = RingShape::compute(16, 0.8, 12345);
    assert_eq!(a, b, "Ring shape must be deterministic under a fixed seed");
}

#[test]
fn test_different_seeds_differ() {
    let a = RingShape::compute(16, 0.3, 1);
    let b = RingShape::compute(16, 0.3, 2);
    assert_ne!(a, b, "Distinct seeds should perturb the silhouette");
}

#[test]
fn test_full_roundness_is_exact_circle() {
    let shape = RingShape::compute(16, 1.0, 777);
    for n in 0..shape.len() {
        assert_eq!(shape[n], 1.0, "Roundness 1 must leave side {} unscaled", n);
    }
}

#[test]
fn test_deviation_shrinks_with_roundness() {
    // scale = 1 - (draw - 0.5) * (1 - roundness), draw in [0, 1)
    for (roundness, envelope) in [(0.0, 0.5), (0.3, 0.35), (0.9, 0.05)] {
        let shape = RingShape::compute(24, roundness, 4242);
        for n in 0..shape.len() {
            assert!(
                (shape[n] - 1.0).abs() <= envelope + 1e-6,
                "Side {} deviates {} at roundness {}",
                n,
                (shape[n] - 1.0).abs(),
                roundness
            );
        }
    }
}
