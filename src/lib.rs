//! Procedural tree mesh generation for Bevy.
//!
//! This crate grows watertight tree meshes (vertices, UVs, triangle
//! indices) from a small set of shape parameters and a random seed. A tree
//! is a tube skeleton of stitched ring cross-sections: each branch segment
//! emits one ring, connects it to the previous ring with a quad strip,
//! shrinks the radius, and either caps off or keeps growing — optionally
//! forking a side branch. The whole pass is bounded by a vertex budget and
//! fully deterministic for a given seed.
//!
//! # Features
//!
//! - **Generation kernel**: seeded, budget-bounded branch growth via
//!   [`grow_tree`] and the resumable [`GrowthCursor`], built on explicit
//!   [`GeometryBuffers`] rather than engine types.
//! - **Mesh assembly**: convert buffers into a Bevy `Mesh` with
//!   recomputed smooth normals via [`build_tree_mesh`], plus bounds via
//!   [`mesher::compute_bounds`].
//! - **Regeneration contract**: the [`ProceduralTree`] component and
//!   [`regenerate_procedural_trees`] system rebuild a tree's mesh only
//!   when its parameters change.
//! - **Export**: OBJ and GLB export utilities via [`export`].
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_arbor::{ProceduralTree, TreeParameters, regenerate_procedural_trees};
//!
//! fn setup(app: &mut App) {
//!     app.add_systems(Update, regenerate_procedural_trees);
//! }
//!
//! fn spawn_tree(
//!     mut commands: Commands,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) {
//!     commands.spawn((
//!         ProceduralTree::new(TreeParameters {
//!             seed: 42,
//!             num_sides: 12,
//!             ..default()
//!         }),
//!         Mesh3d::default(),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```
//!
//! Hosts that want to drive generation directly (headless tools, custom
//! pacing) can skip the ECS layer entirely:
//!
//! ```ignore
//! use bevy_arbor::{TreeParameters, build_tree_mesh, grow_tree};
//!
//! let buffers = grow_tree(TreeParameters::default())?;
//! let mesh = build_tree_mesh(&buffers);
//! ```

pub mod export;
pub mod geometry;
pub mod grower;
pub mod mesher;
pub mod params;
pub mod ring;
pub mod tree;

pub use geometry::GeometryBuffers;
pub use grower::{BranchState, GrowthCursor, GrowthSchedule, grow_tree};
pub use mesher::build_tree_mesh;
pub use params::{ParameterError, TreeParameters};
pub use ring::RingShape;
pub use tree::{ProceduralTree, regenerate_procedural_trees};
