//! Ring cross-section shape generation.
//!
//! Every ring of a tree reuses one [`RingShape`]: a per-side radial scale
//! array that perturbs the otherwise circular cross-section into an
//! irregular, bark-like outline. The shape is derived from its own seeded
//! random stream, so one seed always reproduces one silhouette.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-vertex radial scales for a branch cross-section.
///
/// Holds `num_sides + 1` entries; the first and last are identical so the
/// cylinder seam (which duplicates that vertex for UV wrapping) matches
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RingShape {
    scales: Vec<f32>,
}

impl RingShape {
    /// Computes the ring shape for a side count, roundness and seed.
    ///
    /// Each side draws one uniform value from a stream seeded with `seed`
    /// and scales the unit radius by `1 - (draw - 0.5) * (1 - roundness)`:
    /// roundness 1 yields an exact circle, roundness 0 the widest deviation.
    pub fn compute(num_sides: u32, roundness: f32, seed: u32) -> Self {
        let sides = num_sides as usize;
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let spread = 1.0 - roundness;

        let mut scales = Vec::with_capacity(sides + 1);
        for _ in 0..sides {
            scales.push(1.0 - (rng.random::<f32>() - 0.5) * spread);
        }
        scales.push(scales[0]); // Wrap closure: seam vertex reuses side 0

        Self { scales }
    }

    /// Number of sides this shape was computed for.
    pub fn num_sides(&self) -> u32 {
        (self.scales.len() - 1) as u32
    }

    /// Number of entries (`num_sides + 1`).
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

impl std::ops::Index<usize> for RingShape {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.scales[index]
    }
}
