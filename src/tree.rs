//! Procedural tree component and regeneration system.
//!
//! [`ProceduralTree`] holds the generation parameters for one tree entity;
//! [`regenerate_procedural_trees`] rebuilds its mesh whenever those
//! parameters change. Change detection uses an additive checksum over the
//! parameter fields rather than structural comparison, so the generated
//! mesh stays untouched frame to frame until a field actually moves.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_arbor::{ProceduralTree, TreeParameters, regenerate_procedural_trees};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_systems(Update, regenerate_procedural_trees)
//!         .add_systems(Startup, spawn_tree)
//!         .run();
//! }
//!
//! fn spawn_tree(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
//!     commands.spawn((
//!         ProceduralTree::new(TreeParameters { seed: 42, ..default() }),
//!         Mesh3d::default(),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```

use bevy::camera::primitives::Aabb;
use bevy::prelude::*;

use crate::grower::grow_tree;
use crate::mesher::{build_tree_mesh, compute_bounds};
use crate::params::TreeParameters;

/// Marks an entity as a procedurally generated tree.
///
/// Mutate [`parameters`] freely from game logic or UI; the regeneration
/// system picks the change up on the next frame.
///
/// [`parameters`]: ProceduralTree::parameters
#[derive(Component, Debug, Clone)]
pub struct ProceduralTree {
    /// Generation parameters. Clamped to their practical ranges before
    /// each rebuild, mirroring an inspector's slider bounds.
    pub parameters: TreeParameters,
    /// Checksum of the last generated parameter set.
    last_checksum: Option<f32>,
}

impl ProceduralTree {
    pub fn new(parameters: TreeParameters) -> Self {
        Self {
            parameters,
            last_checksum: None,
        }
    }
}

impl Default for ProceduralTree {
    fn default() -> Self {
        Self::new(TreeParameters::default())
    }
}

/// Rebuilds tree meshes whose parameters changed since the last pass.
///
/// Add to your `Update` schedule. Entities whose checksum is unchanged are
/// skipped entirely, so the cost of an idle tree is one hash per frame.
/// Invalid parameter sets are logged and skipped rather than panicking.
pub fn regenerate_procedural_trees(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut trees: Query<(Entity, &mut ProceduralTree, &mut Mesh3d)>,
) {
    for (entity, mut tree, mut mesh3d) in &mut trees {
        let checksum = tree.parameters.checksum();
        if tree.last_checksum == Some(checksum) {
            continue;
        }
        tree.last_checksum = Some(checksum);

        let buffers = match grow_tree(tree.parameters.clamped()) {
            Ok(buffers) => buffers,
            Err(err) => {
                warn!("procedural tree {entity} not generated: {err}");
                continue;
            }
        };
        debug!("procedural tree {entity} rebuilt: {}", buffers.summary());

        let bounds = compute_bounds(&buffers);
        mesh3d.0 = meshes.add(build_tree_mesh(&buffers));
        match bounds {
            Some(aabb) => {
                commands.entity(entity).insert(aabb);
            }
            None => {
                commands.entity(entity).remove::<Aabb>();
            }
        }
    }
}
