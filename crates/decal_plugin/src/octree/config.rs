//! OctreeConfig - construction parameters for a loose bounds octree.

use glam::Vec3;

use crate::constants::{DEFAULT_LOOSENESS, DEFAULT_MIN_NODE_SIZE, DEFAULT_OCTREE_SIZE};
use crate::error::{DecalError, Result};

/// Construction parameters for [`BoundsOctree`](super::BoundsOctree).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OctreeConfig {
  /// Edge length of the initial root cube in world units.
  pub initial_size: f32,

  /// World-space center of the initial root cube.
  pub initial_center: Vec3,

  /// Nodes whose half edge would fall below this never split.
  pub min_node_size: f32,

  /// Factor applied to node edge length for containment tests.
  /// 1.0 = tight octree, up to 2.0.
  pub looseness: f32,
}

impl OctreeConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_initial_size(mut self, size: f32) -> Self {
    self.initial_size = size;
    self
  }

  pub fn with_initial_center(mut self, center: Vec3) -> Self {
    self.initial_center = center;
    self
  }

  pub fn with_min_node_size(mut self, size: f32) -> Self {
    self.min_node_size = size;
    self
  }

  pub fn with_looseness(mut self, looseness: f32) -> Self {
    self.looseness = looseness;
    self
  }

  /// Check sizes and looseness.
  ///
  /// A `min_node_size` larger than `initial_size` is not an error; the octree
  /// clamps it on construction.
  pub fn validate(&self) -> Result<()> {
    if !(self.initial_size.is_finite() && self.initial_size > 0.0) {
      return Err(DecalError::InvalidOctreeConfig {
        reason: format!("initial_size must be positive, got {}", self.initial_size),
      });
    }
    if !(self.min_node_size.is_finite() && self.min_node_size > 0.0) {
      return Err(DecalError::InvalidOctreeConfig {
        reason: format!("min_node_size must be positive, got {}", self.min_node_size),
      });
    }
    if !(1.0..=2.0).contains(&self.looseness) {
      return Err(DecalError::InvalidOctreeConfig {
        reason: format!("looseness must be within [1, 2], got {}", self.looseness),
      });
    }
    if !self.initial_center.is_finite() {
      return Err(DecalError::InvalidOctreeConfig {
        reason: "initial_center must be finite".to_string(),
      });
    }
    Ok(())
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      initial_size: DEFAULT_OCTREE_SIZE,
      initial_center: Vec3::ZERO,
      min_node_size: DEFAULT_MIN_NODE_SIZE,
      looseness: DEFAULT_LOOSENESS,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
