//! Breath node lifecycle
//!
//! A node is one traveling particle of the beam. Each tick it steps forward
//! along its direction at a power-dependent speed; its radius swells toward a
//! cap while its intensity holds and then fades to zero. The orchestrator
//! owns every node and removes it once it expires.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::PowerTuning;

/// Discrete breath power class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Power {
    Small,
    #[default]
    Medium,
    Large,
}

/// One traveling particle of the beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathNode {
    pos: Vec3,
    /// Unit direction of travel, fixed at spawn
    dir: Vec3,
    power: Power,
    /// Curve parameters snapshotted at spawn so a live tuning reload never
    /// bends a node mid-flight
    tuning: PowerTuning,
    age_ticks: u32,
    travelled: f32,
}

impl BreathNode {
    /// Spawn a node at `origin` heading along `dir` (must already be unit length)
    pub fn new(origin: Vec3, dir: Vec3, power: Power, tuning: PowerTuning) -> Self {
        Self {
            pos: origin,
            dir,
            power,
            tuning,
            age_ticks: 0,
            travelled: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pos
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.dir
    }

    #[inline]
    pub fn power(&self) -> Power {
        self.power
    }

    #[inline]
    pub fn age_ticks(&self) -> u32 {
        self.age_ticks
    }

    /// Advance one tick: step forward, age, rederive radius/intensity
    pub fn advance(&mut self) {
        self.pos += self.dir * self.tuning.speed;
        self.travelled += self.tuning.speed;
        self.age_ticks += 1;
    }

    /// Current radius: grows linearly from the spawn radius, saturating at
    /// the cap when the lifetime runs out
    pub fn current_radius(&self) -> f32 {
        let life_fraction = (self.age_ticks as f32 / self.tuning.lifetime_ticks as f32).min(1.0);
        self.tuning.initial_radius
            + (self.tuning.max_radius - self.tuning.initial_radius) * life_fraction
    }

    /// Current intensity: full strength for the first half of the lifetime,
    /// then a linear fade to zero. Continuous at the transition tick.
    pub fn current_intensity(&self) -> f32 {
        let age = self.age_ticks as f32;
        let lifetime = self.tuning.lifetime_ticks as f32;
        let hold = lifetime * 0.5;
        if age <= hold {
            1.0
        } else {
            ((lifetime - age) / (lifetime - hold)).max(0.0)
        }
    }

    /// True once the node can no longer contribute: intensity fully decayed
    /// or travel beyond the class's maximum range
    pub fn is_expired(&self) -> bool {
        self.current_intensity() <= 0.0 || self.travelled > self.tuning.max_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::BreathTuning;
    use proptest::prelude::*;

    fn medium_node() -> BreathNode {
        let tuning = BreathTuning::default();
        BreathNode::new(Vec3::ZERO, Vec3::X, Power::Medium, tuning.for_power(Power::Medium))
    }

    #[test]
    fn test_advance_steps_along_direction() {
        let mut node = medium_node();
        let speed = BreathTuning::default().medium.speed;
        node.advance();
        assert_eq!(node.age_ticks(), 1);
        assert!((node.position().x - speed).abs() < 1e-6);
        assert_eq!(node.position().y, 0.0);
        assert_eq!(node.position().z, 0.0);
        // Segment length per tick equals speed * one tick
        let before = node.position();
        node.advance();
        assert!(((node.position() - before).length() - speed).abs() < 1e-6);
    }

    #[test]
    fn test_expires_by_range() {
        let mut node = medium_node();
        let t = BreathTuning::default().medium;
        let mut ticks = 0;
        while !node.is_expired() {
            node.advance();
            ticks += 1;
            assert!(ticks < 10_000, "node never expired");
        }
        // Medium dies by range well before its intensity lifetime
        assert!(ticks as f32 * t.speed > t.max_range);
        assert!(node.current_intensity() > 0.0);
    }

    #[test]
    fn test_expires_by_intensity() {
        let tuning = PowerTuning {
            speed: 0.01,
            initial_radius: 0.3,
            max_radius: 0.6,
            lifetime_ticks: 20,
            max_range: 100.0,
        };
        let mut node = BreathNode::new(Vec3::ZERO, Vec3::X, Power::Small, tuning);
        for _ in 0..20 {
            node.advance();
        }
        assert!(node.current_intensity() <= 0.0);
        assert!(node.is_expired());
    }

    #[test]
    fn test_intensity_continuous_at_hold_transition() {
        let mut node = medium_node();
        let lifetime = BreathTuning::default().medium.lifetime_ticks;
        let max_step = 1.0 / (lifetime as f32 * 0.5);
        let mut prev = node.current_intensity();
        for _ in 0..lifetime {
            node.advance();
            let cur = node.current_intensity();
            assert!(prev - cur <= max_step + 1e-6, "intensity jumped: {prev} -> {cur}");
            prev = cur;
        }
    }

    proptest! {
        #[test]
        fn prop_intensity_never_increases(ticks in 0u32..200) {
            let mut node = medium_node();
            let mut prev = node.current_intensity();
            for _ in 0..ticks {
                node.advance();
                let cur = node.current_intensity();
                prop_assert!(cur <= prev + 1e-6);
                prev = cur;
            }
        }

        #[test]
        fn prop_radius_grows_then_saturates(ticks in 0u32..200) {
            let mut node = medium_node();
            let cap = BreathTuning::default().medium.max_radius;
            let mut prev = node.current_radius();
            for _ in 0..ticks {
                node.advance();
                let cur = node.current_radius();
                prop_assert!(cur + 1e-6 >= prev);
                prop_assert!(cur <= cap + 1e-6);
                prev = cur;
            }
        }
    }
}
