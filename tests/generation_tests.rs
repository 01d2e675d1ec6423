use bevy_arbor::{ParameterError, TreeParameters, grow_tree};

// Budget left wide open so termination is radius-driven.
fn trunk_params(seed: u32) -> TreeParameters {
    TreeParameters {
        seed,
        max_vertices: 65000,
        num_sides: 8,
        base_radius: 1.0,
        radius_step: 0.8,
        minimum_radius: 0.1,
        roundness: 0.7,
        segment_length: 0.5,
        twisting: 5.0,
        branch_probability: 0.0,
    }
}

/// Number of rings a trunk emits before radius falloff caps it.
fn expected_rings(params: &TreeParameters) -> u32 {
    let ratio = (params.minimum_radius / params.base_radius).ln();
    (ratio / params.radius_step.ln()).ceil() as u32
}

#[test]
fn test_deterministic_output() {
    let params = TreeParameters {
        seed: 1337,
        branch_probability: 0.25,
        max_vertices: 2048,
        ..TreeParameters::default()
    };

    let first = grow_tree(params).expect("Generation failed");
    let second = grow_tree(params).expect("Generation failed");

    assert_eq!(
        first, second,
        "Same seed and parameters must reproduce identical buffers"
    );
}

#[test]
fn test_seed_changes_geometry_not_topology() {
    let a = grow_tree(trunk_params(1)).unwrap();
    let b = grow_tree(trunk_params(2)).unwrap();

    // An unbranched trunk has seed-independent topology
    assert_eq!(a.vertex_count(), b.vertex_count());
    assert_eq!(a.indices, b.indices);

    // ...but the twist perturbations move the vertices
    assert_ne!(
        a.positions, b.positions,
        "Different seeds should bend the trunk differently"
    );
}

#[test]
fn test_trunk_ring_and_triangle_formulas() {
    for seed in [1, 7, 42, 9999] {
        let params = trunk_params(seed);
        let buffers = grow_tree(params).unwrap();

        let rings = expected_rings(&params);
        assert_eq!(rings, 11, "Sanity check of the test scenario itself");

        // rings * (sides + 1) ring vertices plus one cap centroid
        assert_eq!(buffers.vertex_count(), rings * 9 + 1);

        // Two triangles per side per ring transition, plus the cap fan
        let expected_triangles = 8 * 2 * (rings - 1) + 8;
        assert_eq!(
            buffers.triangle_count(),
            expected_triangles,
            "Seed {} changed trunk topology",
            seed
        );
    }
}

#[test]
fn test_radius_driven_termination_is_seed_independent() {
    let reference = grow_tree(trunk_params(100)).unwrap().vertex_count();
    for seed in [0, 5, 77, 31415] {
        let count = grow_tree(trunk_params(seed)).unwrap().vertex_count();
        assert_eq!(
            count, reference,
            "Segment count must depend on radii alone, not on seed {}",
            seed
        );
    }
}

#[test]
fn test_vertex_budget_bound() {
    // The budget check may overshoot by at most one ring.
    let params = TreeParameters {
        seed: 3,
        max_vertices: 1024,
        num_sides: 8,
        base_radius: 2.0,
        radius_step: 0.9,
        minimum_radius: 0.02,
        roundness: 0.8,
        segment_length: 0.5,
        twisting: 20.0,
        branch_probability: 0.25,
    };

    for seed in [3, 8, 1234, 65535] {
        let buffers = grow_tree(TreeParameters { seed, ..params }).unwrap();
        assert!(
            buffers.vertex_count() <= 1024 + 8,
            "Seed {} exceeded the budget: {} vertices",
            seed,
            buffers.vertex_count()
        );
        // The trunk path completes its 44 radius-driven rings before any
        // fork decision fires, so at least 44 * 9 + 1 vertices exist.
        assert!(
            buffers.vertex_count() >= 44 * 9 + 1,
            "Seed {} terminated early: {} vertices",
            seed,
            buffers.vertex_count()
        );
    }
}

#[test]
fn test_indices_always_valid() {
    for seed in [2, 11, 500] {
        let buffers = grow_tree(TreeParameters {
            seed,
            max_vertices: 2048,
            branch_probability: 0.2,
            ..TreeParameters::default()
        })
        .unwrap();

        assert_eq!(
            buffers.indices.len() % 3,
            0,
            "Indices must come in triangles"
        );
        let count = buffers.vertex_count();
        for &index in &buffers.indices {
            assert!(index < count, "Index {} out of bounds ({})", index, count);
        }
        assert_eq!(
            buffers.positions.len(),
            buffers.uvs.len(),
            "UV buffer must stay parallel to the vertex buffer"
        );
    }
}

#[test]
fn test_non_terminating_parameters_rejected() {
    let runaway_step = TreeParameters {
        radius_step: 1.0,
        ..TreeParameters::default()
    };
    assert!(matches!(
        grow_tree(runaway_step),
        Err(ParameterError::NonTerminating { name: "radius_step", .. })
    ));

    let zero_floor = TreeParameters {
        minimum_radius: 0.0,
        ..TreeParameters::default()
    };
    assert!(matches!(
        grow_tree(zero_floor),
        Err(ParameterError::NonTerminating { name: "minimum_radius", .. })
    ));
}

#[test]
fn test_out_of_range_parameters_rejected() {
    let too_few_sides = TreeParameters {
        num_sides: 2,
        ..TreeParameters::default()
    };
    assert!(matches!(
        grow_tree(too_few_sides),
        Err(ParameterError::OutOfRange { name: "num_sides", .. })
    ));

    let wild_probability = TreeParameters {
        branch_probability: 0.5,
        ..TreeParameters::default()
    };
    assert!(grow_tree(wild_probability).is_err());
}

#[test]
fn test_error_messages_name_the_field() {
    let err = TreeParameters {
        radius_step: 1.5,
        ..TreeParameters::default()
    }
    .validate()
    .unwrap_err();
    assert!(err.to_string().contains("radius_step"));
}

#[test]
fn test_clamped_always_validates() {
    let wild = TreeParameters {
        seed: 9,
        max_vertices: 10,
        num_sides: 100,
        base_radius: 50.0,
        radius_step: 2.0,
        minimum_radius: -1.0,
        roundness: 3.0,
        segment_length: 0.0,
        twisting: 300.0,
        branch_probability: 1.0,
    };

    let clamped = wild.clamped();
    clamped.validate().expect("Clamped parameters must validate");
    assert_eq!(clamped.num_sides, 32);
    assert_eq!(clamped.max_vertices, 1024);
    assert_eq!(clamped.radius_step, 0.95);
    assert_eq!(clamped.minimum_radius, 0.01);

    grow_tree(clamped).expect("Clamped parameters must generate");
}

#[test]
fn test_checksum_tracks_parameter_changes() {
    let base = TreeParameters::default();
    assert_eq!(base.checksum(), TreeParameters::default().checksum());

    let reseeded = TreeParameters { seed: 77, ..base };
    assert_ne!(base.checksum(), reseeded.checksum());

    let thicker = TreeParameters {
        base_radius: 2.5,
        ..base
    };
    assert_ne!(base.checksum(), thicker.checksum());
}
