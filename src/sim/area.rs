//! Breath affected area orchestrator
//!
//! One instance per breathing creature. The owning creature calls
//! [`BreathAffectedArea::continue_breathing`] once per tick while the beam is
//! active and [`BreathAffectedArea::update_tick`] once per tick
//! unconditionally; nodes already in flight keep advancing and depositing
//! density after breathing stops, until they expire on their own.
//!
//! Per-tick pipeline:
//! 1. advance every node, sweeping one segment per node (an expiring node
//!    still contributes its final segment before leaving the list)
//! 2. rasterize each segment into the block density map
//! 3. one batched entity query over the union of segment boxes, then rebuild
//!    the broad-phase index
//! 4. charge each entity at most once per (segment, entity) pair
//! 5. hand every map entry to the weapon policy
//! 6. decay both maps, dropping extinguished entries

use glam::{IVec3, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::density::{DensityMap, EntityId};
use super::node::{BreathNode, Power};
use super::segment::NodeLineSegment;
use super::spatial::{SpatialIndex, VoxelBucketIndex};
use super::weapon::BreathWeapon;
use super::world::WorldView;
use crate::tuning::BreathTuning;

/// Rejected `continue_breathing` input; the simulation state is untouched
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreathError {
    #[error("non-finite breath coordinates: origin {origin:?}, destination {destination:?}")]
    NonFiniteCoordinates { origin: Vec3, destination: Vec3 },
    #[error("degenerate breath direction: origin and destination coincide")]
    DegenerateDirection,
}

/// Live beam state for one creature: nodes in flight plus the block/entity
/// hit-density footprint
pub struct BreathAffectedArea<W: BreathWeapon, I: SpatialIndex = VoxelBucketIndex> {
    nodes: Vec<BreathNode>,
    blocks: DensityMap<IVec3>,
    entities: DensityMap<EntityId>,
    weapon: W,
    index: I,
    rng: Pcg32,
    tuning: BreathTuning,
}

impl<W: BreathWeapon> BreathAffectedArea<W> {
    /// New area with the default voxel-bucket broad phase and default tuning
    pub fn new(weapon: W, seed: u64) -> Self {
        Self::with_index(weapon, VoxelBucketIndex::new(), seed, BreathTuning::default())
    }

    pub fn with_tuning(weapon: W, seed: u64, tuning: BreathTuning) -> Self {
        Self::with_index(weapon, VoxelBucketIndex::new(), seed, tuning)
    }
}

impl<W: BreathWeapon, I: SpatialIndex> BreathAffectedArea<W, I> {
    /// New area with a caller-supplied broad-phase index
    pub fn with_index(weapon: W, index: I, seed: u64, tuning: BreathTuning) -> Self {
        Self {
            nodes: Vec::new(),
            blocks: DensityMap::new(),
            entities: DensityMap::new(),
            weapon,
            index,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// The creature is breathing this tick: spawn one node heading from
    /// `origin` toward `destination`. Degenerate input is rejected here so a
    /// malformed node can never corrupt the geometry downstream.
    pub fn continue_breathing(
        &mut self,
        origin: Vec3,
        destination: Vec3,
        power: Power,
    ) -> Result<(), BreathError> {
        if !origin.is_finite() || !destination.is_finite() {
            log::warn!("rejected breath with non-finite coordinates: {origin:?} -> {destination:?}");
            return Err(BreathError::NonFiniteCoordinates {
                origin,
                destination,
            });
        }
        let Some(direction) = (destination - origin).try_normalize() else {
            log::warn!("rejected breath with zero-length direction at {origin:?}");
            return Err(BreathError::DegenerateDirection);
        };

        self.nodes.push(BreathNode::new(
            origin,
            direction,
            power,
            self.tuning.for_power(power),
        ));
        Ok(())
    }

    /// Advance the whole affected area by one tick. Call exactly once per
    /// simulation tick, breathing or not.
    pub fn update_tick(&mut self, world: &impl WorldView) {
        // 1. Sweep segments. Radius and intensity are snapshotted at tick
        //    start so an expiring node's final segment still deposits.
        let mut segments: Vec<(NodeLineSegment, f32)> = Vec::with_capacity(self.nodes.len());
        self.nodes.retain_mut(|node| {
            let start = node.position();
            let radius = node.current_radius();
            let intensity = node.current_intensity();
            node.advance();
            segments.push((
                NodeLineSegment::new(start, node.position(), radius),
                intensity,
            ));
            !node.is_expired()
        });

        // 2. Rasterize into the block map.
        for (segment, intensity) in &segments {
            segment.add_stochastic_cloud(
                &mut self.rng,
                &mut self.blocks,
                *intensity,
                self.tuning.cloud_samples,
            );
        }

        // 3. One batched entity query over the whole beam, then index it.
        let segment_boxes: Vec<NodeLineSegment> = segments.iter().map(|(s, _)| *s).collect();
        if let Some(beam_box) = NodeLineSegment::union_bounding_box(&segment_boxes) {
            let mut targets = world.entities_within(&beam_box);
            targets.retain(|(id, hitbox)| {
                if hitbox.is_degenerate() {
                    log::warn!("world returned degenerate hitbox for {id:?}; skipping");
                    false
                } else {
                    true
                }
            });
            self.index.rebuild(&targets);

            // 4. Broad phase per segment; each (segment, entity) pair is
            //    charged at most once, distinct segments independently.
            for (segment, intensity) in &segments {
                let segment_box = segment.bounding_box();
                for id in self.index.candidates_within(&segment_box) {
                    let Some((_, hitbox)) = targets.iter().find(|(tid, _)| *tid == id) else {
                        continue;
                    };
                    let hit = segment.collision_check_aabb(
                        &mut self.rng,
                        hitbox,
                        *intensity,
                        self.tuning.entity_cloud_samples,
                    );
                    self.entities.deposit(id, hit);
                }
            }
        }

        // 5. Let the weapon act on every entry, keeping its residual.
        let weapon = &mut self.weapon;
        self.blocks.apply(|pos, density| weapon.affect_block(pos, density));
        self.entities.apply(|id, density| weapon.affect_entity(id, density));

        // 6. Cool both maps; extinguished entries leave.
        self.blocks.decay(|density| weapon.decay_block(density));
        self.entities.decay(|density| weapon.decay_entity(density));
    }

    /// Nodes currently in flight
    pub fn nodes(&self) -> &[BreathNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Hit density currently on a voxel, zero if untouched
    pub fn block_density(&self, pos: IVec3) -> f32 {
        self.blocks.get(pos)
    }

    /// Hit density currently on an entity, zero if untouched
    pub fn entity_density(&self, id: EntityId) -> f32 {
        self.entities.get(id)
    }

    pub fn affected_blocks(&self) -> impl Iterator<Item = (IVec3, f32)> + '_ {
        self.blocks.iter()
    }

    pub fn affected_entities(&self) -> impl Iterator<Item = (EntityId, f32)> + '_ {
        self.entities.iter()
    }

    /// True while anything is still burning: nodes in flight or live density
    pub fn is_active(&self) -> bool {
        !self.nodes.is_empty() || !self.blocks.is_empty() || !self.entities.is_empty()
    }

    pub fn weapon(&self) -> &W {
        &self.weapon
    }

    /// Mutable policy access, e.g. to drain recorded weapon events
    pub fn weapon_mut(&mut self) -> &mut W {
        &mut self.weapon
    }
}
