//! Tree generation parameters and their range contracts.
//!
//! A [`TreeParameters`] value fully determines one generation pass: the same
//! parameters and seed always produce the same mesh. Out-of-range values are
//! rejected at the kernel boundary by [`TreeParameters::validate`] — in
//! particular `radius_step >= 1.0` or `minimum_radius <= 0.0`, either of
//! which would keep the branch radius above its termination floor forever.
//! Callers that prefer silent correction over errors (editors, inspectors)
//! can use [`TreeParameters::clamped`] first.

use thiserror::Error;

/// Configuration violation detected before generation begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The parameter value would make generation non-terminating.
    #[error("{name} = {value} would never reach the termination threshold; {constraint}")]
    NonTerminating {
        name: &'static str,
        value: f32,
        constraint: &'static str,
    },
    /// The parameter value is outside its documented range.
    #[error("{name} = {value} is outside the supported range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Shape parameters for one tree generation pass.
///
/// Immutable while a pass runs. All fields are public so hosts can drive
/// them from their own configuration surface; the kernel validates on entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParameters {
    /// Random seed the ring-shape and growth streams are derived from.
    pub seed: u32,
    /// Vertex budget for the whole mesh. Generation caps branches early
    /// rather than ever exceeding it by more than one ring.
    pub max_vertices: u32,
    /// Number of sides per ring cross-section (3–32).
    pub num_sides: u32,
    /// Trunk radius at the base, in meters.
    pub base_radius: f32,
    /// Multiplicative radius falloff applied per segment, in (0, 1).
    pub radius_step: f32,
    /// Branches terminate once their radius falls below this.
    pub minimum_radius: f32,
    /// Cross-section roundness: 1 is a perfect circle, 0 is maximally
    /// irregular.
    pub roundness: f32,
    /// Length of each branch segment, in meters.
    pub segment_length: f32,
    /// Maximum random bend per segment, in degrees.
    pub twisting: f32,
    /// Chance for a side branch to fork off after each segment.
    pub branch_probability: f32,
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            max_vertices: 65000,
            num_sides: 16,
            base_radius: 2.0,
            radius_step: 0.9,
            minimum_radius: 0.02,
            roundness: 0.8,
            segment_length: 0.5,
            twisting: 20.0,
            branch_probability: 0.1,
        }
    }
}

impl TreeParameters {
    /// Checks every field against its documented range.
    ///
    /// Returns the first violation found. The non-termination hazards get
    /// their own variant so the message explains *why* the value is refused
    /// rather than just naming a range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.radius_step >= 1.0 {
            return Err(ParameterError::NonTerminating {
                name: "radius_step",
                value: self.radius_step,
                constraint: "the per-segment falloff must stay below 1.0",
            });
        }
        if self.minimum_radius <= 0.0 {
            return Err(ParameterError::NonTerminating {
                name: "minimum_radius",
                value: self.minimum_radius,
                constraint: "the radius floor must be positive",
            });
        }
        range_check("radius_step", self.radius_step, f32::EPSILON, 1.0)?;
        range_check("num_sides", self.num_sides as f32, 3.0, 32.0)?;
        range_check("max_vertices", self.max_vertices as f32, 1024.0, 65000.0)?;
        range_check("base_radius", self.base_radius, f32::EPSILON, 4.0)?;
        range_check("minimum_radius", self.minimum_radius, f32::EPSILON, 0.2)?;
        range_check("roundness", self.roundness, 0.0, 1.0)?;
        range_check("segment_length", self.segment_length, f32::EPSILON, 2.0)?;
        range_check("twisting", self.twisting, 0.0, 40.0)?;
        range_check("branch_probability", self.branch_probability, 0.0, 0.25)?;
        Ok(())
    }

    /// Clamps every field to its practical range.
    ///
    /// The clamped ranges are slightly narrower than what [`validate`]
    /// accepts (e.g. `radius_step` lands in 0.75–0.95), so the result always
    /// validates.
    ///
    /// [`validate`]: TreeParameters::validate
    pub fn clamped(self) -> Self {
        Self {
            seed: self.seed,
            max_vertices: self.max_vertices.clamp(1024, 65000),
            num_sides: self.num_sides.clamp(3, 32),
            base_radius: self.base_radius.clamp(0.25, 4.0),
            radius_step: self.radius_step.clamp(0.75, 0.95),
            minimum_radius: self.minimum_radius.clamp(0.01, 0.2),
            roundness: self.roundness.clamp(0.0, 1.0),
            segment_length: self.segment_length.clamp(0.1, 2.0),
            twisting: self.twisting.clamp(0.0, 40.0),
            branch_probability: self.branch_probability.clamp(0.0, 0.25),
        }
    }

    /// Additive hash over all fields, used by hosts to regenerate only when
    /// parameters actually change.
    pub fn checksum(&self) -> f32 {
        (self.seed & 0xFFFF) as f32
            + self.num_sides as f32
            + self.segment_length
            + self.base_radius
            + self.max_vertices as f32
            + self.radius_step
            + self.minimum_radius
            + self.twisting
            + self.branch_probability
            + self.roundness
    }
}

fn range_check(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ParameterError> {
    if value < min || value > max {
        return Err(ParameterError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
