//! Mesh assembly: geometry buffers to renderable Bevy meshes.
//!
//! Pure data conversion — the growth pass owns all the interesting
//! decisions, this module just copies its buffers into a [`Mesh`] and
//! recomputes the derived rendering data (vertex normals, bounds).

use bevy::asset::RenderAssetUsages;
use bevy::camera::primitives::Aabb;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::geometry::GeometryBuffers;

/// Builds a renderable triangle-list mesh from completed geometry buffers.
///
/// Copies positions, UVs and indices, then recomputes smooth vertex normals
/// (averaged across incident triangles) so the tube silhouette shades
/// without facets.
pub fn build_tree_mesh(buffers: &GeometryBuffers) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, buffers.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, buffers.uvs.clone());
    mesh.insert_indices(Indices::U32(buffers.indices.clone()));
    if !buffers.positions.is_empty() {
        mesh.compute_smooth_normals();
    }
    mesh
}

/// Axis-aligned bounds of the generated geometry.
///
/// Returns `None` for empty buffers. Hosts should refresh the entity's
/// [`Aabb`] with this whenever they swap in a regenerated mesh, since
/// stale bounds break frustum culling.
pub fn compute_bounds(buffers: &GeometryBuffers) -> Option<Aabb> {
    let mut positions = buffers.positions.iter();
    let first = *positions.next()?;

    let (min, max) = positions.fold((first, first), |(min, max), &p| {
        (min.min(p), max.max(p))
    });

    Some(Aabb::from_min_max(min, max))
}
