//! Parallel rebuild of many projectors.
//!
//! Two phases:
//!
//! 1. **Resolve** (serial): run every collider query and build any missing
//!    octree. This is the only phase that mutates the cache.
//! 2. **Project** (rayon): each volume is projected against its shared,
//!    read-only octrees with its own clip scratch.
//!
//! Results come back in input order.

use std::sync::Arc;

use rayon::prelude::*;
use web_time::Instant;

use super::projection::{project, resolve_octrees};
use super::types::{ProjectionConfig, RebuildStats};
use crate::cache::OctreeCache;
use crate::clipping::ClipScratch;
use crate::octree::BoundsOctree;
use crate::projector::ProjectorVolume;
use crate::source::ColliderQuery;
use crate::types::{DecalMesh, Triangle};

/// Rebuild every volume; one `(mesh, stats)` pair per input, in order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::rebuild_batch"))]
pub fn rebuild_batch<Q: ColliderQuery + ?Sized>(
  cache: &mut OctreeCache,
  query: &Q,
  volumes: &[ProjectorVolume],
  config: &ProjectionConfig,
) -> Vec<(DecalMesh, RebuildStats)> {
  if volumes.is_empty() {
    return Vec::new();
  }

  // Phase 1: serial resolve
  let resolve_start = Instant::now();
  let resolved: Vec<Vec<Arc<BoundsOctree<Triangle>>>> = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("resolve_octrees", volumes = volumes.len()).entered();

    volumes
      .iter()
      .map(|volume| {
        if volume.is_degenerate() {
          return Vec::new();
        }
        let colliders = query.overlapping(&volume.oriented_box());
        resolve_octrees(cache, &colliders)
      })
      .collect()
  };
  let resolve_us = resolve_start.elapsed().as_micros() as u64;
  let per_volume_resolve_us = resolve_us / volumes.len() as u64;

  // Phase 2: parallel projection against the read-only cache
  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("project_volumes", volumes = volumes.len()).entered();

  volumes
    .par_iter()
    .zip(resolved.par_iter())
    .map_init(ClipScratch::new, |scratch, (volume, octrees)| {
      let mut mesh = DecalMesh::new();
      let mut stats = project(volume, octrees, config, scratch, &mut mesh);
      stats.colliders = octrees.len();
      stats.timing_us += per_volume_resolve_us;
      (mesh, stats)
    })
    .collect()
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;
