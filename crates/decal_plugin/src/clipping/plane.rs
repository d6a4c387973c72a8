//! Oriented plane with a unit normal pointing into the kept half-space.

use glam::Vec3;

/// A plane `n·x + d = 0` with unit normal `n`.
///
/// Signed distance is positive on the side the normal points to (inside).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub distance: f32,
}

impl Plane {
  /// Every point lies outside (signed distance is always -1).
  pub const REJECT_ALL: Self = Self {
    normal: Vec3::ZERO,
    distance: -1.0,
  };

  /// Plane through `point` facing `normal`. The normal is normalized.
  ///
  /// A zero normal yields a plane with zero normal whose signed distance is
  /// always 0, i.e. one that keeps everything.
  pub fn new(normal: Vec3, point: Vec3) -> Self {
    debug_assert!(normal != Vec3::ZERO, "plane normal must be non-zero");
    let normal = normal.normalize_or_zero();
    Self {
      normal,
      distance: -normal.dot(point),
    }
  }

  /// Signed distance from a point to this plane.
  /// Positive = inside (same side as normal), Negative = outside.
  #[inline]
  pub fn signed_distance(&self, point: Vec3) -> f32 {
    self.normal.dot(point) + self.distance
  }

  /// Point on the plane closest to `point`.
  #[inline]
  pub fn closest_point(&self, point: Vec3) -> Vec3 {
    point - self.normal * self.signed_distance(point)
  }

  /// Same plane facing the other way.
  #[inline]
  pub fn flipped(&self) -> Self {
    Self {
      normal: -self.normal,
      distance: -self.distance,
    }
  }
}
