//! Pipeline configuration and per-rebuild statistics.

use crate::constants::DEFAULT_SURFACE_OFFSET;

/// Settings shared by every rebuild.
///
/// Octree parameters live on the [`OctreeCache`](crate::OctreeCache) that
/// builds the trees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionConfig {
  /// Lift along the source face normal, world units.
  pub surface_offset: f32,
}

impl Default for ProjectionConfig {
  fn default() -> Self {
    Self {
      surface_offset: DEFAULT_SURFACE_OFFSET,
    }
  }
}

impl ProjectionConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_surface_offset(mut self, offset: f32) -> Self {
    self.surface_offset = offset;
    self
  }
}

/// Counters for one rebuild.
///
/// `candidates = culled + clipped_away + (triangles that produced output)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
  /// Distinct non-empty source meshes returned by the collider query.
  pub colliders: usize,
  /// Triangles returned by the octree queries.
  pub candidates: usize,
  /// Candidates rejected by the incidence test.
  pub culled: usize,
  /// Candidates with nothing left after clipping.
  pub clipped_away: usize,
  /// Output triangles.
  pub triangles: usize,
  /// Wall time of the rebuild in microseconds.
  pub timing_us: u64,
}

impl RebuildStats {
  /// Accumulate another rebuild's counters.
  pub fn merge(&mut self, other: &RebuildStats) {
    self.colliders += other.colliders;
    self.candidates += other.candidates;
    self.culled += other.culled;
    self.clipped_away += other.clipped_away;
    self.triangles += other.triangles;
    self.timing_us += other.timing_us;
  }
}
