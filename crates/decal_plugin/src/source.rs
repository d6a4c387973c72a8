//! Source geometry and host collaborators.
//!
//! The host owns its scene: it hands the pipeline [`Collider`]s (a shared
//! mesh plus its world transform) through a [`ColliderQuery`], and receives
//! the finished [`DecalMesh`] through a [`MeshSink`]. Everything else about
//! the host (scene graph, render meshes, materials) stays on its side.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{Affine3A, Vec3};

use crate::error::{DecalError, Result};
use crate::octree::Aabb;
use crate::projector::OrientedBox;
use crate::types::{DecalMesh, Triangle};

static MESH_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// MeshId
// =============================================================================

/// Identity of a source mesh.
///
/// Generated atomically - unique within process lifetime. Hosts with their
/// own asset handles can wrap them with [`MeshId::from_raw`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct MeshId(u64);

impl MeshId {
  /// Generate a new unique MeshId.
  pub fn new() -> Self {
    Self(MESH_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Wrap a host-provided identifier.
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for MeshId {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// ColliderKey
// =============================================================================

/// Identity of one placement of a mesh: its [`MeshId`] plus the exact bits of
/// the world transform. Octrees hold world-space triangles, so this (not the
/// mesh id alone) keys the cache.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColliderKey {
  mesh: MeshId,
  transform: [u32; 12],
}

impl ColliderKey {
  pub fn new(mesh: MeshId, transform: &Affine3A) -> Self {
    Self {
      mesh,
      transform: transform.to_cols_array().map(f32::to_bits),
    }
  }

  #[inline]
  pub fn mesh_id(&self) -> MeshId {
    self.mesh
  }
}

// =============================================================================
// SourceMesh
// =============================================================================

/// Static triangle mesh in its own local space.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMesh {
  id: MeshId,
  positions: Vec<Vec3>,
  indices: Vec<u32>,
}

impl SourceMesh {
  /// Validate and wrap a vertex/index buffer pair.
  pub fn new(id: MeshId, positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
    if indices.len() % 3 != 0 {
      return Err(DecalError::IndexCountNotTriangles {
        count: indices.len(),
      });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
      return Err(DecalError::IndexOutOfRange {
        index,
        vertex_count: positions.len(),
      });
    }
    Ok(Self {
      id,
      positions,
      indices,
    })
  }

  #[inline]
  pub fn id(&self) -> MeshId {
    self.id
  }

  #[inline]
  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  #[inline]
  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// Triangles in mesh-local space, in index order.
  pub fn local_triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
    self.indices.chunks_exact(3).map(|tri| {
      [
        self.positions[tri[0] as usize],
        self.positions[tri[1] as usize],
        self.positions[tri[2] as usize],
      ]
    })
  }
}

// =============================================================================
// Collider
// =============================================================================

/// A source mesh placed in the world.
#[derive(Clone, Debug)]
pub struct Collider {
  pub mesh: Arc<SourceMesh>,
  pub transform: Affine3A,
}

impl Collider {
  pub fn new(mesh: Arc<SourceMesh>, transform: Affine3A) -> Self {
    Self { mesh, transform }
  }

  #[inline]
  pub fn mesh_id(&self) -> MeshId {
    self.mesh.id()
  }

  /// Cache key for this placement.
  #[inline]
  pub fn key(&self) -> ColliderKey {
    ColliderKey::new(self.mesh.id(), &self.transform)
  }

  /// World translation of the collider (octree seed center).
  #[inline]
  pub fn translation(&self) -> Vec3 {
    self.transform.translation.into()
  }

  /// Triangles transformed to world space.
  pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
    self.mesh.local_triangles().map(move |[a, b, c]| {
      Triangle::new(
        self.transform.transform_point3(a),
        self.transform.transform_point3(b),
        self.transform.transform_point3(c),
      )
    })
  }

  /// World AABB of the referenced vertices; empty for an empty mesh.
  pub fn world_bounds(&self) -> Aabb {
    let mut bounds = Aabb::empty();
    for &index in self.mesh.indices() {
      bounds.encapsulate(
        self
          .transform
          .transform_point3(self.mesh.positions()[index as usize]),
      );
    }
    bounds
  }
}

// =============================================================================
// Host collaborators
// =============================================================================

/// Host collision query: colliders whose shapes overlap the projector box.
pub trait ColliderQuery {
  fn overlapping(&self, volume: &OrientedBox) -> Vec<Collider>;
}

/// Receives the projected mesh after each rebuild.
pub trait MeshSink {
  /// Replace the host mesh with `mesh` (never called with an empty mesh).
  fn apply(&mut self, mesh: &DecalMesh);

  /// Drop the host mesh: the last rebuild produced nothing.
  fn clear(&mut self);
}

impl MeshSink for DecalMesh {
  fn apply(&mut self, mesh: &DecalMesh) {
    self.clone_from(mesh);
  }

  fn clear(&mut self) {
    DecalMesh::clear(self);
  }
}

/// Flat collider list answering queries by world-AABB overlap.
///
/// Conservative (the AABB of the oriented box may over-report); exactness
/// comes later from the octree query and the clipper.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
  entries: Vec<(Collider, Aabb)>,
}

impl ColliderSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a collider; its world bounds are computed once here.
  pub fn push(&mut self, collider: Collider) {
    let bounds = collider.world_bounds();
    self.entries.push((collider, bounds));
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Collider> {
    self.entries.iter().map(|(collider, _)| collider)
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }
}

impl FromIterator<Collider> for ColliderSet {
  fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
    let mut set = Self::new();
    for collider in iter {
      set.push(collider);
    }
    set
  }
}

impl ColliderQuery for ColliderSet {
  fn overlapping(&self, volume: &OrientedBox) -> Vec<Collider> {
    let query = volume.aabb();
    self
      .entries
      .iter()
      .filter(|(_, bounds)| bounds.is_valid() && bounds.intersects(&query))
      .map(|(collider, _)| collider.clone())
      .collect()
  }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
