//! Broad-phase spatial indexing
//!
//! Exact capsule-vs-hitbox tests for every (segment, entity) pair would be
//! wasted work; most pairs are nowhere near each other. The index buckets
//! every entity under each voxel its hitbox touches, rebuilt once per tick
//! from the batched world query, and answers "who could this box plausibly
//! touch" by walking the box's voxel cover.
//!
//! Kept behind a trait so a bounding-volume hierarchy can replace the bucket
//! map without touching the orchestrator.

use std::collections::{HashMap, HashSet};

use glam::IVec3;

use super::density::EntityId;
use super::geom::Aabb;

/// Per-tick broad-phase candidate lookup
pub trait SpatialIndex {
    /// Replace the index contents with this tick's entity set
    fn rebuild(&mut self, entries: &[(EntityId, Aabb)]);

    /// Entities whose hitbox could plausibly overlap `volume`, deduplicated
    /// and in a stable order. False positives are fine; misses are not.
    fn candidates_within(&self, volume: &Aabb) -> Vec<EntityId>;
}

/// Voxel-coordinate bucket index: entity id under every voxel its box touches
#[derive(Debug, Default)]
pub struct VoxelBucketIndex {
    buckets: HashMap<IVec3, Vec<EntityId>>,
}

impl VoxelBucketIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for VoxelBucketIndex {
    fn rebuild(&mut self, entries: &[(EntityId, Aabb)]) {
        self.buckets.clear();
        for (id, hitbox) in entries {
            for voxel in hitbox.voxels() {
                self.buckets.entry(voxel).or_default().push(*id);
            }
        }
    }

    fn candidates_within(&self, volume: &Aabb) -> Vec<EntityId> {
        let mut seen = HashSet::new();
        for voxel in volume.voxels() {
            if let Some(bucket) = self.buckets.get(&voxel) {
                seen.extend(bucket.iter().copied());
            }
        }
        // Stable order keeps downstream RNG consumption deterministic
        let mut candidates: Vec<EntityId> = seen.into_iter().collect();
        candidates.sort_unstable();
        candidates
    }
}
