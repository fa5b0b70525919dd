//! Data-driven breath balance
//!
//! Everything a breed designer is allowed to touch without recompiling:
//! per-power-class movement/decay curves and the stochastic sample counts.
//! Loaded from JSON when provided, otherwise the built-in table applies.

use serde::{Deserialize, Serialize};

use crate::consts::{CLOUD_SAMPLES_PER_SEGMENT, ENTITY_CLOUD_SAMPLES};
use crate::sim::Power;

/// Curve parameters for one power class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerTuning {
    /// Node travel distance per tick (blocks)
    pub speed: f32,
    /// Node radius at spawn (blocks)
    pub initial_radius: f32,
    /// Radius the node saturates at (blocks)
    pub max_radius: f32,
    /// Ticks until intensity decays to zero
    pub lifetime_ticks: u32,
    /// Node dies once its cumulative travel exceeds this (blocks)
    pub max_range: f32,
}

/// Full balance table for a breath weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathTuning {
    pub small: PowerTuning,
    pub medium: PowerTuning,
    pub large: PowerTuning,

    /// Sample points per segment deposited into the voxel grid each tick
    pub cloud_samples: u32,
    /// Sample points per (segment, entity) overlap estimate
    pub entity_cloud_samples: u32,
}

impl Default for BreathTuning {
    fn default() -> Self {
        Self {
            small: PowerTuning {
                speed: 0.8,
                initial_radius: 0.3,
                max_radius: 0.8,
                lifetime_ticks: 30,
                max_range: 10.0,
            },
            medium: PowerTuning {
                speed: 1.2,
                initial_radius: 0.5,
                max_radius: 1.3,
                lifetime_ticks: 40,
                max_range: 20.0,
            },
            large: PowerTuning {
                speed: 1.6,
                initial_radius: 0.8,
                max_radius: 2.0,
                lifetime_ticks: 50,
                max_range: 40.0,
            },
            cloud_samples: CLOUD_SAMPLES_PER_SEGMENT,
            entity_cloud_samples: ENTITY_CLOUD_SAMPLES,
        }
    }
}

impl BreathTuning {
    /// Curve parameters for a power class
    pub fn for_power(&self, power: Power) -> PowerTuning {
        match power {
            Power::Small => self.small,
            Power::Medium => self.medium,
            Power::Large => self.large,
        }
    }

    /// Parse a tuning table from JSON, falling back to defaults on failure
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid breath tuning JSON, using defaults: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_sane() {
        let t = BreathTuning::default();
        for power in [Power::Small, Power::Medium, Power::Large] {
            let p = t.for_power(power);
            assert!(p.speed > 0.0);
            assert!(p.initial_radius > 0.0);
            assert!(p.max_radius >= p.initial_radius);
            assert!(p.lifetime_ticks > 0);
            assert!(p.max_range > 0.0);
        }
        assert!(t.cloud_samples > 0);
        assert!(t.entity_cloud_samples > 0);
    }

    #[test]
    fn test_json_round_trip() {
        let t = BreathTuning::default();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(BreathTuning::from_json(&json), t);
    }

    #[test]
    fn test_bad_json_falls_back_to_defaults() {
        assert_eq!(BreathTuning::from_json("not json"), BreathTuning::default());
    }
}
