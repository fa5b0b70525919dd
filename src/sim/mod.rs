//! Deterministic breath-weapon simulation
//!
//! All beam logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (one `update_tick` per simulation tick)
//! - Seeded RNG only
//! - Stable iteration where order is observable
//! - No rendering or platform dependencies
//!
//! The collaborator seams are [`WorldView`] (entity queries, supplied by the
//! host world) and [`BreathWeapon`] (what a hit density *does*, supplied by
//! the breed's effect policy).

pub mod area;
pub mod density;
pub mod geom;
pub mod node;
pub mod segment;
pub mod spatial;
pub mod weapon;
pub mod world;

pub use area::{BreathAffectedArea, BreathError};
pub use density::{DensityMap, EntityId};
pub use geom::{Aabb, voxel_containing};
pub use node::{BreathNode, Power};
pub use segment::NodeLineSegment;
pub use spatial::{SpatialIndex, VoxelBucketIndex};
pub use weapon::{BreathWeapon, FlameWeapon, WeaponEvent};
pub use world::{StaticWorld, WorldView};
