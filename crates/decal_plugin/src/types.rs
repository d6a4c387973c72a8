//! Core data types for decal projection.

use glam::{Vec2, Vec3};

use crate::octree::Aabb;

/// World-space triangle with its face normal, as stored in the octree.
///
/// The normal follows the winding order: `(v2 - v1) × (v3 - v1)`, normalized.
/// Zero-area triangles carry a zero normal instead of NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub vertex1: Vec3,
  pub vertex2: Vec3,
  pub vertex3: Vec3,
  /// Unit face normal, or `Vec3::ZERO` for degenerate triangles.
  pub normal: Vec3,
}

impl Triangle {
  /// Create a triangle and compute its face normal.
  pub fn new(vertex1: Vec3, vertex2: Vec3, vertex3: Vec3) -> Self {
    let normal = (vertex2 - vertex1)
      .cross(vertex3 - vertex1)
      .normalize_or_zero();
    Self {
      vertex1,
      vertex2,
      vertex3,
      normal,
    }
  }

  /// Vertices in winding order.
  #[inline]
  pub fn vertices(&self) -> [Vec3; 3] {
    [self.vertex1, self.vertex2, self.vertex3]
  }

  /// Tight bounds of the three vertices.
  #[inline]
  pub fn bounds(&self) -> Aabb {
    Aabb::from_points(&self.vertices())
  }

  /// True for zero-area (or zero-length edge) triangles.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.normal == Vec3::ZERO
  }
}

/// Projection result handed to the mesh sink.
///
/// Every output triangle owns its three vertices (no welding), so
/// `vertices`, `uvs` and `indices` all grow by three per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecalMesh {
  /// Vertex positions in projector-local space.
  pub vertices: Vec<Vec3>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Projected texture coordinates (parallel to vertices).
  pub uvs: Vec<Vec2>,
}

impl DecalMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.uvs.clear();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Append one triangle with its UVs.
  #[inline]
  pub fn push_triangle(&mut self, positions: [Vec3; 3], uvs: [Vec2; 3]) {
    for (position, uv) in positions.into_iter().zip(uvs) {
      self.indices.push(self.vertices.len() as u32);
      self.vertices.push(position);
      self.uvs.push(uv);
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
