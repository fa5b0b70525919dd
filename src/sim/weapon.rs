//! Breath weapon effect policy
//!
//! The orchestrator never knows what a hit density *means*; the breed's
//! weapon policy does. Once per tick, every live map entry is handed to the
//! policy, which applies its effect and returns the residual density to keep
//! (raise, hold, or zero it). Separate decay callbacks then cool the maps.
//!
//! Contract for implementors:
//! - every callback must be total over density >= 0
//! - decay callbacks return zero for zero and never increase density
//! - no callback may re-enter the orchestrator

use glam::IVec3;

use super::density::EntityId;

/// Effect policy for one breath element
pub trait BreathWeapon {
    /// A block entry is being processed this tick; returns the new density
    fn affect_block(&mut self, pos: IVec3, density: f32) -> f32;

    /// An entity entry is being processed this tick; returns the new density
    fn affect_entity(&mut self, id: EntityId, density: f32) -> f32;

    /// Per-tick cooling applied to every surviving block entry
    fn decay_block(&self, density: f32) -> f32;

    /// Per-tick cooling applied to every surviving entity entry
    fn decay_entity(&self, density: f32) -> f32;
}

/// Something the flame weapon did this tick, for consumers to drain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponEvent {
    BlockIgnited { pos: IVec3 },
    EntityDamaged { id: EntityId, amount: f32 },
}

/// Fire-breed policy: ignites blocks past a density threshold and burns
/// entities for damage proportional to their exposure
#[derive(Debug, Clone)]
pub struct FlameWeapon {
    /// Block density at which ignition triggers
    pub ignite_threshold: f32,
    /// Damage dealt per point of entity hit density
    pub damage_per_density: f32,
    /// Cooling subtracted from each block entry per tick
    pub block_decay_per_tick: f32,
    /// Cooling subtracted from each entity entry per tick
    pub entity_decay_per_tick: f32,

    events: Vec<WeaponEvent>,
}

impl Default for FlameWeapon {
    fn default() -> Self {
        Self {
            ignite_threshold: 0.3,
            damage_per_density: 2.0,
            block_decay_per_tick: 0.25,
            entity_decay_per_tick: 0.5,
            events: Vec::new(),
        }
    }
}

impl FlameWeapon {
    /// Take everything the weapon did since the last drain
    pub fn drain_events(&mut self) -> Vec<WeaponEvent> {
        std::mem::take(&mut self.events)
    }
}

impl BreathWeapon for FlameWeapon {
    fn affect_block(&mut self, pos: IVec3, density: f32) -> f32 {
        if density >= self.ignite_threshold {
            self.events.push(WeaponEvent::BlockIgnited { pos });
        }
        density
    }

    fn affect_entity(&mut self, id: EntityId, density: f32) -> f32 {
        let amount = density * self.damage_per_density;
        if amount > 0.0 {
            self.events.push(WeaponEvent::EntityDamaged { id, amount });
        }
        // Most of the exposure is spent on the burn; a residual lingers
        density * 0.25
    }

    fn decay_block(&self, density: f32) -> f32 {
        (density - self.block_decay_per_tick).max(0.0)
    }

    fn decay_entity(&self, density: f32) -> f32 {
        (density - self.entity_decay_per_tick).max(0.0)
    }
}
