//! Hit-density bookkeeping
//!
//! Two of these maps form the beam's persistent footprint: voxel -> density
//! and entity -> density. The invariant both maintain is that a key is
//! present iff its density is strictly positive, so the maps stay bounded to
//! whatever the beam is actually touching.
//!
//! Mutation passes rebuild the map rather than removing entries while
//! iterating.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a living entity in the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A decaying accumulator keyed by voxel coordinate or entity id
#[derive(Debug, Clone, Default)]
pub struct DensityMap<K: Eq + Hash + Copy> {
    inner: HashMap<K, f32>,
}

impl<K: Eq + Hash + Copy> DensityMap<K> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Current density for a key, zero if untouched
    pub fn get(&self, key: K) -> f32 {
        self.inner.get(&key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: K) -> bool {
        self.inner.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f32)> + '_ {
        self.inner.iter().map(|(k, v)| (*k, *v))
    }

    /// Accumulate density onto a key. Non-positive or non-finite amounts are
    /// ignored so degenerate sampling can never violate the presence
    /// invariant.
    pub fn deposit(&mut self, key: K, amount: f32) {
        if amount > 0.0 && amount.is_finite() {
            *self.inner.entry(key).or_insert(0.0) += amount;
        }
    }

    /// Replace every entry's density with `f(key, density)`, dropping entries
    /// that come back at or below zero. A negative return is a policy bug;
    /// it is clamped out (entry dropped) and reported once per pass.
    pub fn apply(&mut self, mut f: impl FnMut(K, f32) -> f32) {
        let mut negatives = 0usize;
        let entries: Vec<(K, f32)> = self.inner.drain().collect();
        for (key, density) in entries {
            let next = f(key, density);
            if next > 0.0 {
                self.inner.insert(key, next);
            } else if next < 0.0 {
                negatives += 1;
            }
        }
        if negatives > 0 {
            log::warn!("density callback returned negative values for {negatives} entries; clamped to zero");
        }
    }

    /// Decay pass: same rebuild as [`apply`](Self::apply) but the callback
    /// only sees the density
    pub fn decay(&mut self, mut f: impl FnMut(f32) -> f32) {
        self.apply(|_, density| f(density));
    }
}
