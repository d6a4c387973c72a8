//! Per-placement octree cache.
//!
//! One [`BoundsOctree`] of world-space triangles per placed mesh
//! ([`ColliderKey`]), built the first time a projector touches it and shared
//! read-only afterwards. Two colliders sharing one [`SourceMesh`] at
//! different transforms get separate trees.
//!
//! [`SourceMesh`]: crate::source::SourceMesh
//! A tree is fully built before it is published, so a reader never sees a
//! partial index.
//!
//! The cache assumes static geometry: a mesh moved or edited after its tree
//! was built keeps the stale tree until [`OctreeCache::clear`].

use std::collections::HashMap;
use std::sync::Arc;

use web_time::Instant;

use crate::error::Result;
use crate::octree::{BoundsOctree, OctreeConfig};
use crate::source::{Collider, ColliderKey};
use crate::types::Triangle;

/// Explicit cache service owned by whoever orchestrates rebuilds.
#[derive(Debug)]
pub struct OctreeCache {
  config: OctreeConfig,
  trees: HashMap<ColliderKey, Arc<BoundsOctree<Triangle>>>,
  generation: u64,
  builds: u64,
}

impl OctreeCache {
  /// Create an empty cache; `config` seeds every tree it builds.
  pub fn new(config: OctreeConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      config,
      trees: HashMap::new(),
      generation: 0,
      builds: 0,
    })
  }

  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Octree for the collider's placement, building it on first use.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "cache::get_or_build"))]
  pub fn get_or_build(&mut self, collider: &Collider) -> Arc<BoundsOctree<Triangle>> {
    let key = collider.key();
    if let Some(tree) = self.trees.get(&key) {
      return Arc::clone(tree);
    }

    let tree = Arc::new(self.build(collider));
    self.builds += 1;
    self.trees.insert(key, Arc::clone(&tree));
    tree
  }

  /// Cached octree for `key`, if one was built.
  pub fn get(&self, key: &ColliderKey) -> Option<&Arc<BoundsOctree<Triangle>>> {
    self.trees.get(key)
  }

  pub fn contains(&self, key: &ColliderKey) -> bool {
    self.trees.contains_key(key)
  }

  /// Number of cached trees.
  pub fn len(&self) -> usize {
    self.trees.len()
  }

  pub fn is_empty(&self) -> bool {
    self.trees.is_empty()
  }

  /// Drop every cached tree and start a new generation.
  pub fn clear(&mut self) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
      trees = self.trees.len(),
      generation = self.generation + 1,
      "octree cache cleared"
    );
    self.trees.clear();
    self.generation += 1;
  }

  /// Bumped on every `clear`.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Trees built over the cache's lifetime.
  pub fn builds(&self) -> u64 {
    self.builds
  }

  fn build(&self, collider: &Collider) -> BoundsOctree<Triangle> {
    let start = Instant::now();

    let seed = collider.translation();
    let config = if seed.is_finite() {
      self.config.with_initial_center(seed)
    } else {
      self.config
    };
    let mut tree = BoundsOctree::from_validated(config);

    let mut dropped = 0usize;
    for triangle in collider.world_triangles() {
      if !tree.add(triangle, triangle.bounds()) {
        dropped += 1;
      }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
      mesh = collider.mesh_id().raw(),
      triangles = tree.len(),
      dropped,
      nodes = tree.node_count(),
      depth = tree.max_depth(),
      build_us = start.elapsed().as_micros() as u64,
      "built mesh octree"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (start, dropped);

    tree
  }
}

impl Default for OctreeCache {
  fn default() -> Self {
    Self {
      config: OctreeConfig::default(),
      trees: HashMap::new(),
      generation: 0,
      builds: 0,
    }
  }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;
