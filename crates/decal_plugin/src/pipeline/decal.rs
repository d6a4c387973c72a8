//! DecalProjector - a projector entity with an explicit dirty flag.
//!
//! The host pushes changes in (`set_transform`, `set_params`, `mark_dirty`)
//! and calls [`DecalProjector::rebuild_if_dirty`] once per update; a clean
//! projector costs nothing.

use super::projection::rebuild;
use super::types::{ProjectionConfig, RebuildStats};
use crate::cache::OctreeCache;
use crate::metrics::ProjectionMetrics;
use crate::projector::{DecalParams, ProjectorTransform, ProjectorVolume};
use crate::source::{ColliderQuery, MeshSink};
use crate::types::DecalMesh;

/// A decal placed in the world, with the mesh of its last rebuild.
#[derive(Clone, Debug)]
pub struct DecalProjector {
  transform: ProjectorTransform,
  params: DecalParams,
  mesh: DecalMesh,
  dirty: bool,
  metrics: ProjectionMetrics,
}

impl DecalProjector {
  /// A new projector starts dirty so its first update builds a mesh.
  pub fn new(transform: ProjectorTransform, params: DecalParams) -> Self {
    Self {
      transform,
      params,
      mesh: DecalMesh::new(),
      dirty: true,
      metrics: ProjectionMetrics::new(),
    }
  }

  pub fn transform(&self) -> &ProjectorTransform {
    &self.transform
  }

  pub fn params(&self) -> &DecalParams {
    &self.params
  }

  /// Mesh produced by the last rebuild, in projector-local space.
  pub fn mesh(&self) -> &DecalMesh {
    &self.mesh
  }

  /// Rebuild history; only filled with the `metrics` feature.
  pub fn metrics(&self) -> &ProjectionMetrics {
    &self.metrics
  }

  pub fn metrics_mut(&mut self) -> &mut ProjectionMetrics {
    &mut self.metrics
  }

  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  /// Update the placement; marks dirty only when it actually changed.
  pub fn set_transform(&mut self, transform: ProjectorTransform) {
    if self.transform != transform {
      self.transform = transform;
      self.dirty = true;
    }
  }

  /// Update the presentation parameters; marks dirty only when changed.
  pub fn set_params(&mut self, params: DecalParams) {
    if self.params != params {
      self.params = params;
      self.dirty = true;
    }
  }

  /// Request a rebuild on the next update (e.g. after the host edited
  /// source geometry and cleared the cache).
  pub fn mark_dirty(&mut self) {
    self.dirty = true;
  }

  /// Volume for the current transform and params.
  pub fn volume(&self) -> ProjectorVolume {
    ProjectorVolume::new(&self.transform, &self.params)
  }

  /// Rebuild and hand the mesh to `sink` if anything changed since the
  /// last rebuild. Returns `None` for a clean projector.
  pub fn rebuild_if_dirty<Q, S>(
    &mut self,
    cache: &mut OctreeCache,
    query: &Q,
    config: &ProjectionConfig,
    sink: &mut S,
  ) -> Option<RebuildStats>
  where
    Q: ColliderQuery + ?Sized,
    S: MeshSink + ?Sized,
  {
    if !self.dirty {
      return None;
    }
    self.dirty = false;

    let volume = self.volume();
    let stats = rebuild(cache, query, &volume, config, &mut self.mesh);

    if self.mesh.is_empty() {
      sink.clear();
    } else {
      sink.apply(&self.mesh);
    }

    #[cfg(feature = "metrics")]
    self.metrics.record_rebuild(&stats);

    #[cfg(feature = "tracing")]
    tracing::debug!(
      triangles = stats.triangles,
      colliders = stats.colliders,
      timing_us = stats.timing_us,
      "decal rebuilt"
    );

    Some(stats)
  }

  /// Rebuild regardless of the dirty flag.
  pub fn force_rebuild<Q, S>(
    &mut self,
    cache: &mut OctreeCache,
    query: &Q,
    config: &ProjectionConfig,
    sink: &mut S,
  ) -> RebuildStats
  where
    Q: ColliderQuery + ?Sized,
    S: MeshSink + ?Sized,
  {
    self.mark_dirty();
    self
      .rebuild_if_dirty(cache, query, config, sink)
      .unwrap_or_default()
  }
}

impl Default for DecalProjector {
  fn default() -> Self {
    Self::new(ProjectorTransform::default(), DecalParams::default())
  }
}

#[cfg(test)]
#[path = "decal_test.rs"]
mod decal_test;
