//! Fixed-capacity polygon buffers for clipping.

use glam::Vec3;

use crate::constants::MAX_CLIP_VERTICES;

/// Convex polygon with room for a triangle clipped by every plane.
#[derive(Clone, Copy, Debug)]
pub struct ClipPolygon {
  vertices: [Vec3; MAX_CLIP_VERTICES],
  len: usize,
}

impl ClipPolygon {
  pub fn new() -> Self {
    Self {
      vertices: [Vec3::ZERO; MAX_CLIP_VERTICES],
      len: 0,
    }
  }

  /// Create a polygon from a triangle (3 vertices).
  pub fn from_triangle(triangle: [Vec3; 3]) -> Self {
    let mut polygon = Self::new();
    polygon.set_triangle(triangle);
    polygon
  }

  /// Replace the contents with a triangle.
  #[inline]
  pub fn set_triangle(&mut self, triangle: [Vec3; 3]) {
    self.vertices[..3].copy_from_slice(&triangle);
    self.len = 3;
  }

  /// Append a vertex.
  ///
  /// Overflow means the convexity bound was broken; it trips a debug
  /// assertion and the vertex is dropped in release builds.
  #[inline]
  pub fn push(&mut self, vertex: Vec3) {
    debug_assert!(
      self.len < MAX_CLIP_VERTICES,
      "clipped polygon exceeded {} vertices",
      MAX_CLIP_VERTICES
    );
    if self.len < MAX_CLIP_VERTICES {
      self.vertices[self.len] = vertex;
      self.len += 1;
    }
  }

  #[inline]
  pub fn clear(&mut self) {
    self.len = 0;
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Returns true if the polygon has been completely clipped away.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len < 3
  }

  #[inline]
  pub fn as_slice(&self) -> &[Vec3] {
    &self.vertices[..self.len]
  }
}

impl Default for ClipPolygon {
  fn default() -> Self {
    Self::new()
  }
}

/// Ping-pong buffers reused across clip calls.
///
/// Owned by the caller; one per thread when rebuilding in parallel.
#[derive(Clone, Debug, Default)]
pub struct ClipScratch {
  pub(crate) front: ClipPolygon,
  pub(crate) back: ClipPolygon,
}

impl ClipScratch {
  pub fn new() -> Self {
    Self::default()
  }
}
