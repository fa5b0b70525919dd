//! World query collaborator
//!
//! The host world owns entities; the simulation only ever asks one question
//! of it per tick: which living entities overlap this volume? The contract
//! tolerates false positives (the broad phase filters them) but never false
//! negatives.

use std::collections::BTreeMap;

use super::density::EntityId;
use super::geom::Aabb;

/// Narrow view onto the host world's entity storage
pub trait WorldView {
    /// All living entities whose hitbox overlaps `volume`, with their
    /// current hitboxes
    fn entities_within(&self, volume: &Aabb) -> Vec<(EntityId, Aabb)>;
}

/// Fixed entity set backed by a map; the world stand-in for tests and demos
#[derive(Debug, Default)]
pub struct StaticWorld {
    entities: BTreeMap<EntityId, Aabb>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or move an entity
    pub fn place(&mut self, id: EntityId, hitbox: Aabb) {
        self.entities.insert(id, hitbox);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }
}

impl WorldView for StaticWorld {
    fn entities_within(&self, volume: &Aabb) -> Vec<(EntityId, Aabb)> {
        self.entities
            .iter()
            .filter(|(_, hitbox)| hitbox.intersects(volume))
            .map(|(id, hitbox)| (*id, *hitbox))
            .collect()
    }
}
