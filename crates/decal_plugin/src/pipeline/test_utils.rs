//! Test utilities for pipeline tests.
//!
//! Source mesh fixtures, a counting collider query and a recording mesh
//! sink.

use std::cell::Cell;
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};

use crate::projector::OrientedBox;
use crate::source::{Collider, ColliderQuery, ColliderSet, MeshId, MeshSink, SourceMesh};
use crate::types::DecalMesh;

// =============================================================================
// Mesh fixtures
// =============================================================================

/// Square of edge `2 * half_size` in the XY plane at z = 0, two triangles,
/// normals facing -Z (towards a projector looking down +Z).
pub fn quad_mesh(half_size: f32) -> SourceMesh {
  let h = half_size;
  SourceMesh::new(
    MeshId::new(),
    vec![
      Vec3::new(-h, -h, 0.0),
      Vec3::new(h, -h, 0.0),
      Vec3::new(h, h, 0.0),
      Vec3::new(-h, h, 0.0),
    ],
    vec![0, 2, 1, 0, 3, 2],
  )
  .unwrap()
}

/// Grid of `cells × cells` quads (2 triangles each) in the XY plane,
/// centered on the origin, normals facing -Z.
pub fn grid_mesh(cells: u32, cell_size: f32) -> SourceMesh {
  let half = cells as f32 * cell_size * 0.5;
  let stride = cells + 1;
  let mut positions = Vec::with_capacity((stride * stride) as usize);
  for y in 0..stride {
    for x in 0..stride {
      positions.push(Vec3::new(
        x as f32 * cell_size - half,
        y as f32 * cell_size - half,
        0.0,
      ));
    }
  }

  let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
  for y in 0..cells {
    for x in 0..cells {
      let i0 = y * stride + x;
      let i1 = i0 + 1;
      let i2 = i0 + stride + 1;
      let i3 = i0 + stride;
      indices.extend_from_slice(&[i0, i2, i1, i0, i3, i2]);
    }
  }

  SourceMesh::new(MeshId::new(), positions, indices).unwrap()
}

/// Single triangle with the given winding.
pub fn triangle_mesh(a: Vec3, b: Vec3, c: Vec3) -> SourceMesh {
  SourceMesh::new(MeshId::new(), vec![a, b, c], vec![0, 1, 2]).unwrap()
}

pub fn collider(mesh: SourceMesh, transform: Affine3A) -> Collider {
  Collider::new(Arc::new(mesh), transform)
}

/// Collider set holding one quad at the origin.
pub fn single_quad_scene(half_size: f32) -> ColliderSet {
  std::iter::once(collider(quad_mesh(half_size), Affine3A::IDENTITY)).collect()
}

/// Rotation that turns the projector's +Z (forward) into `direction`.
pub fn looking_along(direction: Vec3) -> Quat {
  Quat::from_rotation_arc(Vec3::Z, direction.normalize())
}

// =============================================================================
// Collaborator mocks
// =============================================================================

/// Wraps a collider set and counts queries.
pub struct CountingQuery {
  pub inner: ColliderSet,
  pub calls: Cell<usize>,
}

impl CountingQuery {
  pub fn new(inner: ColliderSet) -> Self {
    Self {
      inner,
      calls: Cell::new(0),
    }
  }
}

impl ColliderQuery for CountingQuery {
  fn overlapping(&self, volume: &OrientedBox) -> Vec<Collider> {
    self.calls.set(self.calls.get() + 1);
    self.inner.overlapping(volume)
  }
}

/// Sink recording every call.
#[derive(Default)]
pub struct RecordingSink {
  pub applied: Vec<DecalMesh>,
  pub clears: usize,
}

impl MeshSink for RecordingSink {
  fn apply(&mut self, mesh: &DecalMesh) {
    self.applied.push(mesh.clone());
  }

  fn clear(&mut self) {
    self.clears += 1;
  }
}
