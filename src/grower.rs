//! The branch growth algorithm.
//!
//! One [`GrowthCursor`] owns everything a generation pass needs: the
//! validated parameters, the precomputed [`RingShape`], a seeded random
//! stream, the [`GeometryBuffers`] being filled, and an explicit work stack
//! of pending branch states. Processing an item emits one ring, stitches it
//! to its trailing ring, applies radius falloff, and either caps the branch
//! (radius floor or vertex budget reached) or schedules the continuation
//! and a fork decision.
//!
//! The work stack replaces native call-stack recursion: depth is bounded by
//! the vertex budget instead of the thread stack, and the cursor can be
//! driven one step at a time by callers that want to pace generation
//! themselves. Items are popped LIFO, which reproduces the depth-first
//! order of a recursive formulation exactly — a branch's whole continuation
//! subtree is processed (consuming its random draws) before the fork
//! decision for that segment fires.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::GeometryBuffers;
use crate::params::{ParameterError, TreeParameters};
use crate::ring::RingShape;

/// Scales how fast the V texture coordinate advances per segment.
const TEX_V_STEP: f32 = 0.0625;

/// Growth state for one pending branch segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchState {
    /// Orientation of the branch frame; rings are emitted in its XZ plane.
    pub rotation: Quat,
    /// Tip position the next ring is emitted around.
    pub position: Vec3,
    /// First vertex index of the trailing ring, `None` for the trunk base.
    pub parent_ring: Option<u32>,
    /// Current branch radius.
    pub radius: f32,
    /// Accumulated longitudinal texture coordinate.
    pub tex_v: f32,
}

enum WorkItem {
    /// Emit and stitch the next ring for this state.
    Grow(BranchState),
    /// Decide whether a side branch forks off. Carries the pre-twist
    /// orientation at the already-advanced tip.
    ForkDecision(BranchState),
}

/// Resumable tree generation pass.
///
/// [`step`] processes one work item at a time; [`finish`] drains the stack.
/// Callers that animate growth can interleave steps with mesh snapshots on
/// their own schedule (see [`GrowthSchedule`]) — the cursor itself is
/// synchronous and holds no timing state.
///
/// [`step`]: GrowthCursor::step
/// [`finish`]: GrowthCursor::finish
pub struct GrowthCursor {
    params: TreeParameters,
    shape: RingShape,
    rng: StdRng,
    buffers: GeometryBuffers,
    stack: Vec<WorkItem>,
}

impl GrowthCursor {
    /// Starts a generation pass, rejecting out-of-range parameters before
    /// any geometry is emitted.
    pub fn new(params: TreeParameters) -> Result<Self, ParameterError> {
        params.validate()?;

        // The ring silhouette and the growth perturbations draw from two
        // independent streams derived from the same seed, so regenerating
        // with one seed reproduces both.
        let shape = RingShape::compute(params.num_sides, params.roundness, params.seed);
        let rng = StdRng::seed_from_u64(params.seed as u64);

        let trunk = BranchState {
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            parent_ring: None,
            radius: params.base_radius,
            tex_v: 0.0,
        };

        Ok(Self {
            params,
            shape,
            rng,
            buffers: GeometryBuffers::new(),
            stack: vec![WorkItem::Grow(trunk)],
        })
    }

    /// Processes one pending work item.
    ///
    /// Returns `false` once no work remains; calling again afterwards does
    /// nothing.
    pub fn step(&mut self) -> bool {
        match self.stack.pop() {
            Some(WorkItem::Grow(state)) => self.grow(state),
            Some(WorkItem::ForkDecision(state)) => self.try_fork(state),
            None => {}
        }
        !self.stack.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// The buffers filled so far. Open branch ends are not capped until
    /// their own termination step runs.
    pub fn buffers(&self) -> &GeometryBuffers {
        &self.buffers
    }

    pub fn into_buffers(self) -> GeometryBuffers {
        self.buffers
    }

    /// Drains the remaining work and returns the completed buffers.
    pub fn finish(mut self) -> GeometryBuffers {
        while self.step() {}
        self.buffers
    }

    /// One segment of branch growth: ring, stitch, falloff, then either cap
    /// or schedule the continuation and fork decision.
    fn grow(&mut self, state: BranchState) {
        let sides = self.params.num_sides;

        let ring_start = self.buffers.add_ring(
            state.position,
            state.rotation,
            state.radius,
            &self.shape,
            state.tex_v,
        );
        if let Some(last_ring) = state.parent_ring {
            self.buffers.connect_rings(last_ring, sides);
        }

        let radius = state.radius * self.params.radius_step;

        // End of this branch path: radius floor reached, or the next ring
        // would not fit the vertex budget.
        if radius < self.params.minimum_radius
            || self.buffers.vertex_count() + sides >= self.params.max_vertices
        {
            let step_u = 1.0 / sides as f32;
            let cap_uv = Vec2::new(2.0 + step_u, state.tex_v + 1.0);
            self.buffers.cap(state.position, cap_uv, sides);
            return;
        }

        // Thinner branches advance V faster, so bark texture stretches less
        // on the trunk than on twigs.
        let segment = self.params.segment_length;
        let tex_v = state.tex_v + TEX_V_STEP * (segment + segment / radius);
        let position = state.position + state.rotation * Vec3::new(0.0, segment, 0.0);

        let x = (self.rng.random::<f32>() - 0.5) * self.params.twisting;
        let z = (self.rng.random::<f32>() - 0.5) * self.params.twisting;
        let twisted = state.rotation
            * Quat::from_euler(EulerRot::XYZ, x.to_radians(), 0.0, z.to_radians());

        let anchor = Some(ring_start);

        // LIFO: the continuation subtree fully resolves before the fork
        // decision for this segment is taken.
        self.stack.push(WorkItem::ForkDecision(BranchState {
            rotation: state.rotation,
            position,
            parent_ring: anchor,
            radius,
            tex_v,
        }));
        self.stack.push(WorkItem::Grow(BranchState {
            rotation: twisted,
            position,
            parent_ring: anchor,
            radius,
            tex_v,
        }));
    }

    /// Decides whether a side branch forks off a finished segment.
    ///
    /// The fork shares the continuation's anchor ring, radius and V
    /// coordinate; only its orientation differs — a wide tilt biased away
    /// from zero so forks never come out near-straight.
    fn try_fork(&mut self, state: BranchState) {
        // Budget exhausted: skip without consuming a draw.
        if self.buffers.vertex_count() + self.params.num_sides >= self.params.max_vertices {
            return;
        }
        // Strict comparison: probability 0 never forks, on any seed.
        if self.rng.random::<f32>() >= self.params.branch_probability {
            return;
        }

        let x = biased_tilt(self.rng.random::<f32>());
        let z = biased_tilt(self.rng.random::<f32>());
        let rotation = state.rotation
            * Quat::from_euler(EulerRot::XYZ, x.to_radians(), 0.0, z.to_radians());

        self.stack.push(WorkItem::Grow(BranchState { rotation, ..state }));
    }
}

/// Maps a uniform draw to a fork tilt of 10°–45° magnitude, either sign.
fn biased_tilt(draw: f32) -> f32 {
    let tilt = draw * 70.0 - 35.0;
    tilt + if tilt > 0.0 { 10.0 } else { -10.0 }
}

/// Generates a complete tree in one call.
pub fn grow_tree(params: TreeParameters) -> Result<GeometryBuffers, ParameterError> {
    Ok(GrowthCursor::new(params)?.finish())
}

/// Growth pacing for callers that reveal a tree over time.
///
/// Plain data, no engine coupling: the application wires its own events
/// (timers, gameplay collisions) to [`boost`] and [`slow`] and sleeps
/// `delay` between cursor steps.
///
/// [`boost`]: GrowthSchedule::boost
/// [`slow`]: GrowthSchedule::slow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSchedule {
    /// Seconds between growth steps.
    pub delay: f32,
}

impl GrowthSchedule {
    pub fn new(delay: f32) -> Self {
        Self { delay }
    }

    /// Halves the delay, clamped to a 0.01s floor.
    pub fn boost(&mut self) {
        self.delay = (self.delay * 0.5).max(0.01);
    }

    /// Doubles the delay.
    pub fn slow(&mut self) {
        self.delay *= 2.0;
    }
}

impl Default for GrowthSchedule {
    fn default() -> Self {
        Self { delay: 0.2 }
    }
}
