//! Single-projector rebuild.
//!
//! ```text
//! ColliderQuery ──► OctreeCache ──► octree query ──► incidence cull
//!   (overlap)      (build once)    (query bounds)         │
//!                                                         ▼
//!   DecalMesh ◄── local space ◄── UV + lift ◄── fan ◄── clip (6 planes)
//! ```
//!
//! Nothing here fails: empty queries, culled faces and triangles clipped to
//! nothing are skipped and counted in [`RebuildStats`].

use std::sync::Arc;

use web_time::Instant;

use super::types::{ProjectionConfig, RebuildStats};
use crate::cache::OctreeCache;
use crate::clipping::{clip_triangle, ClipScratch};
use crate::octree::BoundsOctree;
use crate::projector::ProjectorVolume;
use crate::source::{Collider, ColliderKey, ColliderQuery};
use crate::triangulate::fan_triangulate;
use crate::types::{DecalMesh, Triangle};

/// Project `volume` onto already-resolved octrees.
///
/// `output` is cleared first. `stats.colliders` is left at zero; the caller
/// that resolved the octrees knows how many meshes there were.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::project"))]
pub fn project(
  volume: &ProjectorVolume,
  octrees: &[Arc<BoundsOctree<Triangle>>],
  config: &ProjectionConfig,
  scratch: &mut ClipScratch,
  output: &mut DecalMesh,
) -> RebuildStats {
  let start = Instant::now();
  output.clear();

  let mut stats = RebuildStats::default();
  if volume.is_degenerate() {
    #[cfg(feature = "tracing")]
    tracing::trace!("degenerate projector volume, nothing to project");
    return stats;
  }

  let query = volume.query_bounds();
  let to_local = volume.world_to_local();
  let mut candidates: Vec<&Triangle> = Vec::new();

  for tree in octrees {
    candidates.clear();
    tree.get_colliding(&query, &mut candidates);
    stats.candidates += candidates.len();

    for triangle in &candidates {
      if !volume.accepts_normal(triangle.normal) {
        stats.culled += 1;
        continue;
      }

      let polygon = clip_triangle(triangle.vertices(), volume.clip_planes(), scratch);
      if polygon.is_empty() {
        stats.clipped_away += 1;
        continue;
      }

      let lift = triangle.normal * config.surface_offset;
      for corners in fan_triangulate(polygon.as_slice()) {
        let uvs = corners.map(|point| volume.uv_for(point));
        let positions = corners.map(|point| to_local.transform_point3(point + lift));
        output.push_triangle(positions, uvs);
        stats.triangles += 1;
      }
    }
  }

  stats.timing_us = start.elapsed().as_micros() as u64;

  #[cfg(feature = "tracing")]
  tracing::trace!(
    candidates = stats.candidates,
    culled = stats.culled,
    clipped_away = stats.clipped_away,
    triangles = stats.triangles,
    "projected decal"
  );

  stats
}

/// Query colliders, resolve their octrees through `cache`, and project.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::rebuild"))]
pub fn rebuild<Q: ColliderQuery + ?Sized>(
  cache: &mut OctreeCache,
  query: &Q,
  volume: &ProjectorVolume,
  config: &ProjectionConfig,
  output: &mut DecalMesh,
) -> RebuildStats {
  let start = Instant::now();

  if volume.is_degenerate() {
    output.clear();
    return RebuildStats::default();
  }

  let colliders = query.overlapping(&volume.oriented_box());
  let octrees = resolve_octrees(cache, &colliders);

  let mut scratch = ClipScratch::new();
  let mut stats = project(volume, &octrees, config, &mut scratch, output);
  stats.colliders = octrees.len();
  stats.timing_us = start.elapsed().as_micros() as u64;
  stats
}

/// One octree per distinct placement, in first-seen order.
pub(super) fn resolve_octrees(
  cache: &mut OctreeCache,
  colliders: &[Collider],
) -> Vec<Arc<BoundsOctree<Triangle>>> {
  let mut seen: Vec<ColliderKey> = Vec::with_capacity(colliders.len());
  let mut octrees = Vec::with_capacity(colliders.len());

  for collider in colliders {
    let key = collider.key();
    if seen.contains(&key) {
      continue;
    }
    seen.push(key);
    if collider.mesh.is_empty() {
      continue;
    }
    octrees.push(cache.get_or_build(collider));
  }

  octrees
}

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;
