//! Swept node segments and stochastic overlap sampling
//!
//! Each tick, every live node sweeps a capsule from its previous position to
//! its new one. Rather than integrating capsule/voxel overlap analytically,
//! we throw a fixed number of random sample points into the capsule and
//! deposit a slice of the node's intensity wherever each point lands. More
//! samples converge toward the true overlap at higher per-tick cost.
//!
//! Sampling is driven by the caller's RNG; the orchestrator threads a seeded
//! Pcg32 through here, so identical seeds reproduce identical deltas.

use glam::{IVec3, Vec3};
use rand::Rng;

use super::density::DensityMap;
use super::geom::{Aabb, voxel_containing};

/// The capsule a node swept through during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLineSegment {
    pub start: Vec3,
    pub end: Vec3,
    /// Node radius at tick start
    pub radius: f32,
}

impl NodeLineSegment {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Minimal box enclosing the swept capsule
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_corners(self.start, self.end).expand(self.radius)
    }

    /// Aggregate box over a whole tick's segments, None when the beam is idle
    pub fn union_bounding_box(segments: &[NodeLineSegment]) -> Option<Aabb> {
        Aabb::union_all(segments.iter().map(|s| s.bounding_box()))
    }

    /// One point distributed over the capsule: uniform along the axis plus a
    /// uniform-in-sphere offset scaled by the radius
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec3 {
        let t: f32 = rng.random_range(0.0..=1.0);
        self.start.lerp(self.end, t) + random_in_unit_sphere(rng) * self.radius
    }

    /// Scatter `samples` points into the block map, each depositing
    /// `intensity / samples` into the voxel containing it
    pub fn add_stochastic_cloud(
        &self,
        rng: &mut impl Rng,
        blocks: &mut DensityMap<IVec3>,
        intensity: f32,
        samples: u32,
    ) {
        if samples == 0 || intensity <= 0.0 {
            return;
        }
        let per_sample = intensity / samples as f32;
        for _ in 0..samples {
            blocks.deposit(voxel_containing(self.random_point(rng)), per_sample);
        }
    }

    /// Estimate this capsule's overlap with one target box: the fraction of
    /// `samples` points landing inside, scaled by `intensity`. Degenerate
    /// targets count as zero overlap.
    pub fn collision_check_aabb(
        &self,
        rng: &mut impl Rng,
        target: &Aabb,
        intensity: f32,
        samples: u32,
    ) -> f32 {
        if samples == 0 || intensity <= 0.0 || target.is_degenerate() {
            return 0.0;
        }
        let mut inside = 0u32;
        for _ in 0..samples {
            if target.contains_point(self.random_point(rng)) {
                inside += 1;
            }
        }
        intensity * inside as f32 / samples as f32
    }
}

/// Uniform point in the unit sphere via rejection sampling
fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if v.length_squared() <= 1.0 {
            return v;
        }
    }
}
