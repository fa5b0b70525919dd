//! Dragonfire - breath-weapon area-of-effect simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (nodes, segments, hit densities, orchestrator)
//! - `tuning`: Data-driven power-class balance
//!
//! The owning creature drives one [`sim::BreathAffectedArea`] instance:
//! `continue_breathing` once per tick while the beam is active, `update_tick`
//! once per tick unconditionally. Everything else (rendering, sound,
//! persistence, the creature entity itself) lives outside this crate.

pub mod sim;
pub mod tuning;

pub use sim::{
    Aabb, BreathAffectedArea, BreathError, BreathNode, BreathWeapon, DensityMap, EntityId,
    FlameWeapon, NodeLineSegment, Power, SpatialIndex, StaticWorld, VoxelBucketIndex, WeaponEvent,
    WorldView, voxel_containing,
};
pub use tuning::{BreathTuning, PowerTuning};

/// Simulation configuration constants
pub mod consts {
    /// Sample points thrown into the voxel grid per segment per tick
    pub const CLOUD_SAMPLES_PER_SEGMENT: u32 = 10;
    /// Sample points used per (segment, entity) overlap estimate
    pub const ENTITY_CLOUD_SAMPLES: u32 = 10;
}
