//! Geometry buffers and the ring-level operations that fill them.
//!
//! [`GeometryBuffers`] accumulates vertex positions, UVs and triangle
//! indices for one generation pass. The buffers are exclusively owned by
//! the pass that fills them and handed to the mesh assembler afterwards;
//! regeneration always starts from cleared buffers.
//!
//! Invariants upheld by every operation here: `uvs.len() == positions.len()`
//! at all times, indices come in triples, and every index refers to an
//! already-emitted vertex.

use bevy::prelude::*;

use crate::ring::RingShape;

/// Vertex, UV and triangle-index buffers for one tree mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffers {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all accumulated geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Human-readable diagnostics line for the current contents.
    pub fn summary(&self) -> String {
        format!(
            "Mesh has {} vertices and {} triangles",
            self.vertex_count(),
            self.triangle_count()
        )
    }

    /// Emits one ring of `num_sides + 1` vertices around `center`.
    ///
    /// Vertex `n` sits at angle `n * 2π / num_sides`, pushed out to
    /// `shape[n] * radius` and rotated into the branch frame. UVs run
    /// `0..=1` in U around the ring (the duplicated seam vertex carries
    /// U = 1) and `tex_v` in V. Returns the index of the ring's first
    /// vertex.
    pub fn add_ring(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radius: f32,
        shape: &RingShape,
        tex_v: f32,
    ) -> u32 {
        let start = self.positions.len() as u32;
        let sides = shape.num_sides();
        let step_u = 1.0 / sides as f32;

        for n in 0..=sides {
            let ang = n as f32 * step_u * std::f32::consts::TAU;
            let r = shape[n as usize] * radius;
            let offset = Vec3::new(r * ang.cos(), 0.0, r * ang.sin());

            self.positions.push(center + rotation * offset);
            self.uvs.push(Vec2::new(n as f32 * step_u, tex_v));
        }

        start
    }

    /// Stitches the most recently emitted ring to a previous ring with a
    /// quad strip: two triangles per side, consistently wound, no gaps for
    /// any ring size >= 3.
    ///
    /// `last_ring_start` is the first vertex index of the trailing ring.
    pub fn connect_rings(&mut self, last_ring_start: u32, num_sides: u32) {
        let curr_ring_start = self.vertex_count() - (num_sides + 1);

        for i in 0..num_sides {
            let last = last_ring_start + i;
            let curr = curr_ring_start + i;

            self.indices.push(last + 1); // Triangle A
            self.indices.push(last);
            self.indices.push(curr);

            self.indices.push(curr); // Triangle B
            self.indices.push(curr + 1);
            self.indices.push(last + 1);
        }
    }

    /// Closes the open end of a branch with a centroid vertex and a
    /// triangle fan over the just-emitted ring.
    ///
    /// The cap UV is offset a whole unit in both axes from the ring row,
    /// which keeps the ring texture continuous without a separate atlas
    /// region. Undone exactly by [`uncap`].
    ///
    /// [`uncap`]: GeometryBuffers::uncap
    pub fn cap(&mut self, center: Vec3, uv: Vec2, num_sides: u32) {
        let ring_start = self.vertex_count() - (num_sides + 1);

        self.positions.push(center);
        self.uvs.push(uv);
        let centroid = self.vertex_count() - 1;

        for n in ring_start..ring_start + num_sides {
            self.indices.push(n);
            self.indices.push(centroid);
            self.indices.push(n + 1);
        }
    }

    /// Removes the centroid vertex and fan triangles added by [`cap`],
    /// restoring the buffers to their exact pre-cap state so the branch can
    /// be extended further.
    ///
    /// [`cap`]: GeometryBuffers::cap
    pub fn uncap(&mut self, num_sides: u32) {
        let fan_indices = (num_sides * 3) as usize;
        self.indices.truncate(self.indices.len() - fan_indices);
        self.positions.pop();
        self.uvs.pop();
    }
}
