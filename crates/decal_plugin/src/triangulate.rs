//! Fan triangulation of convex clipped polygons.
//!
//! ```text
//!        p2 ──── p3
//!       ╱  ╲      ╲
//!     p1    ╲      p4      N vertices → N - 2 triangles
//!       ╲    ╲    ╱        (p0, p1, p2), (p0, p2, p3), ...
//!        p0 ──────
//! ```
//!
//! Winding follows the input polygon, which the clipper keeps in the source
//! triangle's order.

use glam::Vec3;

/// Split a convex polygon into triangles sharing its first vertex.
///
/// Yields nothing for fewer than 3 vertices; a triangle passes through
/// unchanged.
#[inline]
pub fn fan_triangulate(polygon: &[Vec3]) -> impl Iterator<Item = [Vec3; 3]> + '_ {
  let count = fan_triangle_count(polygon.len());
  (0..count).map(move |i| [polygon[0], polygon[i + 1], polygon[i + 2]])
}

/// Number of fan triangles for a polygon with `vertex_count` vertices.
#[inline]
pub fn fan_triangle_count(vertex_count: usize) -> usize {
  vertex_count.saturating_sub(2)
}

/// Area of a planar polygon via the cross-product fan sum.
pub fn polygon_area(polygon: &[Vec3]) -> f32 {
  if polygon.len() < 3 {
    return 0.0;
  }
  let origin = polygon[0];
  let sum = polygon
    .windows(2)
    .skip(1)
    .fold(Vec3::ZERO, |acc, edge| {
      acc + (edge[0] - origin).cross(edge[1] - origin)
    });
  sum.length() * 0.5
}

#[cfg(test)]
#[path = "triangulate_test.rs"]
mod triangulate_test;
