//! BoundsOctree - loose octree over payloads with axis-aligned bounds.
//!
//! # Insertion
//!
//! ```text
//! add(payload, bounds)
//!   │
//!   ├─ bounds outside root loose bounds? ──► grow root towards bounds (≤ 20×)
//!   │
//!   ▼
//! node = root
//!   ├─ leaf with < 8 entries, or too small to split ──► store here
//!   ├─ leaf, full ──► split into 8 children, redistribute entries
//!   └─ best-fit child (by bounds center) contains bounds?
//!        ├─ yes ──► descend
//!        └─ no  ──► store here
//! ```
//!
//! # Growth
//!
//! The new root is twice the size and shifted half an edge towards the
//! payload on each axis. The old root becomes one of its 8 children; the
//! other 7 are fresh empty nodes.

use glam::Vec3;
use smallvec::SmallVec;

use super::node::{octant_of, Entry, OctreeNode};
use super::{Aabb, OctreeConfig};
use crate::constants::{MAX_ENTRIES_PER_NODE, MAX_GROW_ATTEMPTS};
use crate::error::Result;

/// Loose octree storing payloads of type `T` keyed by their tight bounds.
#[derive(Clone, Debug)]
pub struct BoundsOctree<T> {
  nodes: Vec<OctreeNode<T>>,
  root: usize,
  count: usize,
  looseness: f32,
  min_node_size: f32,
}

impl<T> BoundsOctree<T> {
  /// Create an empty octree with a single root node.
  pub fn new(config: OctreeConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self::from_validated(config))
  }

  /// Construct from a config that already passed `validate`.
  pub(crate) fn from_validated(config: OctreeConfig) -> Self {
    let mut min_node_size = config.min_node_size;
    if min_node_size > config.initial_size {
      #[cfg(feature = "tracing")]
      tracing::warn!(
        min_node_size,
        initial_size = config.initial_size,
        "octree min_node_size exceeds initial size, clamping"
      );
      min_node_size = config.initial_size;
    }

    Self {
      nodes: vec![OctreeNode::new(
        config.initial_center,
        config.initial_size,
        config.looseness,
      )],
      root: 0,
      count: 0,
      looseness: config.looseness,
      min_node_size,
    }
  }

  /// Number of stored payloads.
  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  /// Number of allocated nodes.
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Loose bounds of the current root.
  pub fn root_bounds(&self) -> Aabb {
    self.nodes[self.root].loose_bounds
  }

  /// Edge length of the current root's tight cube.
  pub fn root_size(&self) -> f32 {
    self.nodes[self.root].base_length
  }

  /// Depth of the deepest node (root = 0).
  pub fn max_depth(&self) -> usize {
    let mut deepest = 0;
    let mut stack: SmallVec<[(usize, usize); 32]> = SmallVec::new();
    stack.push((self.root, 0));
    while let Some((index, depth)) = stack.pop() {
      deepest = deepest.max(depth);
      if let Some(children) = &self.nodes[index].children {
        stack.extend(children.iter().map(|&child| (child, depth + 1)));
      }
    }
    deepest
  }

  /// Insert a payload with its tight bounds.
  ///
  /// Returns `false` (and drops the payload) only for non-finite bounds or
  /// when the root cannot grow far enough to contain them.
  pub fn add(&mut self, payload: T, bounds: Aabb) -> bool {
    if !bounds.is_valid() {
      #[cfg(feature = "tracing")]
      tracing::debug!(?bounds, "octree rejected payload with invalid bounds");
      return false;
    }

    let mut attempts = 0;
    while !self.nodes[self.root].loose_bounds.contains_aabb(&bounds) {
      if attempts == MAX_GROW_ATTEMPTS {
        #[cfg(feature = "tracing")]
        tracing::warn!(
          ?bounds,
          root_size = self.root_size(),
          "octree growth limit reached, payload dropped"
        );
        return false;
      }
      let direction = bounds.center() - self.nodes[self.root].center;
      self.grow(direction);
      attempts += 1;
    }

    self.insert_from(self.root, Entry { payload, bounds });
    self.count += 1;
    true
  }

  /// Collect every payload whose tight bounds intersect `query`.
  pub fn get_colliding<'a>(&'a self, query: &Aabb, results: &mut Vec<&'a T>) {
    let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
    stack.push(self.root);
    while let Some(index) = stack.pop() {
      let node = &self.nodes[index];
      if !node.loose_bounds.intersects(query) {
        continue;
      }
      results.extend(
        node
          .entries
          .iter()
          .filter(|entry| entry.bounds.intersects(query))
          .map(|entry| &entry.payload),
      );
      if let Some(children) = &node.children {
        stack.extend(children.iter().copied());
      }
    }
  }

  /// Convenience wrapper around [`get_colliding`](Self::get_colliding).
  pub fn colliding(&self, query: &Aabb) -> Vec<&T> {
    let mut results = Vec::new();
    self.get_colliding(query, &mut results);
    results
  }

  /// True if any payload's tight bounds intersect `query`.
  pub fn is_colliding(&self, query: &Aabb) -> bool {
    let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
    stack.push(self.root);
    while let Some(index) = stack.pop() {
      let node = &self.nodes[index];
      if !node.loose_bounds.intersects(query) {
        continue;
      }
      if node.entries.iter().any(|entry| entry.bounds.intersects(query)) {
        return true;
      }
      if let Some(children) = &node.children {
        stack.extend(children.iter().copied());
      }
    }
    false
  }

  /// Iterate over all payloads in arena order.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self
      .nodes
      .iter()
      .flat_map(|node| node.entries.iter().map(|entry| &entry.payload))
  }

  /// Descend from `index` and store the entry in the smallest fitting node.
  fn insert_from(&mut self, mut index: usize, entry: Entry<T>) {
    loop {
      let (children, entry_count, base_length) = {
        let node = &self.nodes[index];
        (node.children, node.entries.len(), node.base_length)
      };

      let children = match children {
        Some(children) => children,
        None if entry_count < MAX_ENTRIES_PER_NODE || base_length * 0.5 < self.min_node_size => {
          self.nodes[index].entries.push(entry);
          return;
        }
        None => self.split(index),
      };

      let child = children[self.nodes[index].octant_for(entry.bounds.center()) as usize];
      if self.nodes[child].loose_bounds.contains_aabb(&entry.bounds) {
        index = child;
      } else {
        self.nodes[index].entries.push(entry);
        return;
      }
    }
  }

  /// Allocate 8 children for a leaf and push its entries down where they fit.
  fn split(&mut self, index: usize) -> [usize; 8] {
    let center = self.nodes[index].center;
    let child_length = self.nodes[index].base_length * 0.5;

    let mut children = [0usize; 8];
    for (octant, slot) in children.iter_mut().enumerate() {
      let child_center = self.nodes[index].child_center(octant as u8);
      *slot = self.nodes.len();
      self
        .nodes
        .push(OctreeNode::new(child_center, child_length, self.looseness));
    }
    self.nodes[index].children = Some(children);

    let entries = std::mem::take(&mut self.nodes[index].entries);
    for entry in entries {
      let child = children[octant_of(center, entry.bounds.center()) as usize];
      if self.nodes[child].loose_bounds.contains_aabb(&entry.bounds) {
        self.nodes[child].entries.push(entry);
      } else {
        self.nodes[index].entries.push(entry);
      }
    }

    children
  }

  /// Double the root towards `direction`, adopting the old root as a child.
  fn grow(&mut self, direction: Vec3) {
    let sign = Vec3::select(direction.cmpge(Vec3::ZERO), Vec3::ONE, Vec3::NEG_ONE);
    let old_root = self.root;
    let old_center = self.nodes[old_root].center;
    let old_length = self.nodes[old_root].base_length;

    let new_center = old_center + sign * (old_length * 0.5);
    let new_root = OctreeNode::new(new_center, old_length * 2.0, self.looseness);

    if self.count == 0 {
      // Nothing to keep: restart the arena with the larger root
      self.nodes.clear();
      self.nodes.push(new_root);
      self.root = 0;
      return;
    }

    let root_index = self.nodes.len();
    self.nodes.push(new_root);

    let old_octant = octant_of(new_center, old_center) as usize;
    let mut children = [0usize; 8];
    for (octant, slot) in children.iter_mut().enumerate() {
      if octant == old_octant {
        *slot = old_root;
        continue;
      }
      let child_center = self.nodes[root_index].child_center(octant as u8);
      *slot = self.nodes.len();
      self
        .nodes
        .push(OctreeNode::new(child_center, old_length, self.looseness));
    }

    self.nodes[root_index].children = Some(children);
    self.root = root_index;
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
