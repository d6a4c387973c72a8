//! Axis-aligned bounding box used for octree nodes, payloads and queries.

use glam::Vec3;

/// Single-precision axis-aligned bounding box.
///
/// Bounds are closed: boxes that only touch at a face, edge or corner
/// intersect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  /// Minimum corner (inclusive).
  pub min: Vec3,
  /// Maximum corner (inclusive).
  pub max: Vec3,
}

impl Aabb {
  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.cmple(max).all(),
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create an AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  /// Create a new AABB from center and half-extents.
  pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Cube centered on `center` with the given edge length.
  pub fn cube(center: Vec3, edge_length: f32) -> Self {
    Self::from_center_half_extents(center, Vec3::splat(edge_length * 0.5))
  }

  /// Smallest AABB containing all points. Empty input yields `empty()`.
  pub fn from_points(points: &[Vec3]) -> Self {
    let mut aabb = Self::empty();
    for &point in points {
      aabb.encapsulate(point);
    }
    aabb
  }

  /// Expand to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Expand to include another box.
  #[inline]
  pub fn encapsulate_aabb(&mut self, other: &Aabb) {
    self.min = self.min.min(other.min);
    self.max = self.max.max(other.max);
  }

  /// Check if this AABB overlaps with another.
  ///
  /// Two AABBs overlap if they share any interior or boundary points.
  #[inline]
  pub fn intersects(&self, other: &Aabb) -> bool {
    self.min.x <= other.max.x
      && self.max.x >= other.min.x
      && self.min.y <= other.max.y
      && self.max.y >= other.min.y
      && self.min.z <= other.max.z
      && self.max.z >= other.min.z
  }

  /// Check if `other` lies entirely inside this box (boundary inclusive).
  #[inline]
  pub fn contains_aabb(&self, other: &Aabb) -> bool {
    self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
  }

  /// Check if this AABB contains a point.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Grow by `amount` on every side.
  #[inline]
  pub fn expanded(&self, amount: f32) -> Self {
    Self {
      min: self.min - Vec3::splat(amount),
      max: self.max + Vec3::splat(amount),
    }
  }

  /// True if min <= max on all axes and every component is finite.
  pub fn is_valid(&self) -> bool {
    self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Get the half-extents of the AABB.
  #[inline]
  pub fn half_extents(&self) -> Vec3 {
    self.size() * 0.5
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}
