//! Convex polygon clipping against half-space planes.
//!
//! Sutherland-Hodgman boundary classification of a triangle against the six
//! planes of the projector volume. Polygons live in fixed-capacity buffers
//! owned by the caller ([`ClipScratch`]), so clipping never allocates and
//! concurrent rebuilds never share state.
//!
//! ```text
//! edge v1 → v2            emitted
//! ─────────────────────   ─────────────────────
//! inside  → inside        v2
//! outside → outside       (nothing)
//! outside → inside        intersection, v2
//! inside  → outside       intersection
//! ```
//!
//! A vertex within `PLANE_EPSILON` of the plane counts as inside.

pub mod plane;
pub mod polygon;

pub use plane::Plane;
pub use polygon::{ClipPolygon, ClipScratch};

use glam::Vec3;

use crate::constants::{CLIP_PLANE_COUNT, PLANE_EPSILON};

/// Clip `input` against one half-space, writing the kept region to `output`.
///
/// `output` is cleared first. Intersections are only computed for edges whose
/// endpoints lie strictly on opposite sides of the tolerance band; an
/// endpoint inside the band already marks the crossing.
pub fn clip_against_halfspace(input: &ClipPolygon, plane: &Plane, output: &mut ClipPolygon) {
  output.clear();

  let vertices = input.as_slice();
  let count = vertices.len();
  if count == 0 {
    return;
  }

  for i in 0..count {
    let v1 = vertices[i];
    let v2 = vertices[(i + 1) % count];

    let d1 = plane.signed_distance(v1);
    let d2 = plane.signed_distance(v2);

    let v1_inside = d1 >= -PLANE_EPSILON;
    let v2_inside = d2 >= -PLANE_EPSILON;

    match (v1_inside, v2_inside) {
      (true, true) => output.push(v2),
      (false, false) => {}
      (false, true) => {
        if d2 > PLANE_EPSILON {
          push_intersection(v1, v2, d1, d2, output);
        }
        output.push(v2);
      }
      (true, false) => {
        if d1 > PLANE_EPSILON {
          push_intersection(v1, v2, d1, d2, output);
        }
      }
    }
  }
}

/// Emit the point where edge `v1 → v2` crosses the plane.
///
/// Callers only get here with the endpoints on opposite sides of the
/// tolerance band, so `|d1 - d2| > 2 * PLANE_EPSILON`: a near-parallel edge
/// never reaches the division.
#[inline]
fn push_intersection(v1: Vec3, v2: Vec3, d1: f32, d2: f32, output: &mut ClipPolygon) {
  let denominator = d1 - d2;
  debug_assert!(denominator.abs() > 2.0 * PLANE_EPSILON);
  let t = d1 / denominator;
  output.push(v1 + (v2 - v1) * t);
}

/// Clip a triangle against all planes in order.
///
/// Returns the clipped polygon stored in `scratch`; it is empty (fewer than 3
/// vertices) when the triangle lies outside the volume.
pub fn clip_triangle<'a>(
  triangle: [Vec3; 3],
  planes: &[Plane; CLIP_PLANE_COUNT],
  scratch: &'a mut ClipScratch,
) -> &'a ClipPolygon {
  let ClipScratch { front, back } = scratch;
  front.set_triangle(triangle);

  for plane in planes {
    clip_against_halfspace(front, plane, back);
    std::mem::swap(front, back);
    if front.is_empty() {
      front.clear();
      break;
    }
  }

  front
}
