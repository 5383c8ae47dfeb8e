// Board layout for newly generated topics.
//
// Goals:
// - Deterministic: no randomness, no time budgets
// - No overlap: every node keeps a minimum center distance from every other
// - Compact: a batch lands next to its parent as a single row when it fits
//
// Submodules:
// - collision: point hash grid for distance checks
// - placement: cardinal-row placement with spiral fallback

use serde::{Deserialize, Serialize};

use crate::error::PlacementError;

mod collision;
mod placement;

pub use placement::plan_positions;

/// Minimum distance between nodes on the board.
pub const MIN_NODE_DISTANCE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementConfig {
    /// Minimum center-to-center distance; closer than this is a collision.
    pub min_distance: f64,
    /// Ring radius (and row spacing) as a multiple of `min_distance`.
    pub radius_factor: f64,
    /// Points tried on the first spiral ring.
    pub initial_ring_attempts: usize,
    /// Extra points tried on each following ring.
    pub ring_attempts_step: usize,
    /// Growth of the radius multiplier per ring.
    pub ring_radius_step: f64,
    /// Rings walked before the spiral gives up.
    pub max_spiral_rings: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: MIN_NODE_DISTANCE,
            radius_factor: 1.2,
            initial_ring_attempts: 8,
            ring_attempts_step: 4,
            ring_radius_step: 0.5,
            max_spiral_rings: 1000,
        }
    }
}

impl PlacementConfig {
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self { min_distance, ..Self::default() }
    }

    /// Radius of the cardinal rows and of the first spiral ring.
    pub fn base_radius(&self) -> f64 {
        self.min_distance * self.radius_factor
    }

    pub fn validate(&self) -> Result<(), PlacementError> {
        let invalid = |msg: String| -> Result<(), PlacementError> {
            Err(PlacementError::InvalidInput(msg))
        };

        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return invalid(format!("min distance {} must be finite and >= 0", self.min_distance));
        }
        if !self.radius_factor.is_finite() || self.radius_factor <= 0.0 {
            return invalid(format!("radius factor {} must be finite and > 0", self.radius_factor));
        }
        if !self.ring_radius_step.is_finite() || self.ring_radius_step <= 0.0 {
            return invalid(format!("ring radius step {} must be finite and > 0", self.ring_radius_step));
        }
        if self.initial_ring_attempts == 0 {
            return invalid("initial ring attempts must be at least 1".to_string());
        }
        if self.max_spiral_rings == 0 {
            return invalid("max spiral rings must be at least 1".to_string());
        }
        Ok(())
    }
}
