//! OctreeNode - arena-stored node of a loose bounds octree.
//!
//! Nodes reference their children by arena index, so the tree can grow by
//! allocating a new root and adopting the old one as a child without
//! relinking any pointers.

use glam::Vec3;
use smallvec::SmallVec;

use super::Aabb;
use crate::constants::MAX_ENTRIES_PER_NODE;

/// A payload stored in a node together with its tight bounds.
#[derive(Clone, Debug)]
pub struct Entry<T> {
  pub payload: T,
  pub bounds: Aabb,
}

/// Octree node.
///
/// `base_length` is the edge of the tight cube; `loose_bounds` is the same
/// cube scaled by the tree's looseness and is what containment and query
/// tests run against.
#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
  pub center: Vec3,
  pub base_length: f32,
  pub loose_bounds: Aabb,
  pub entries: SmallVec<[Entry<T>; MAX_ENTRIES_PER_NODE]>,
  /// Arena indices of the 8 children, by octant.
  pub children: Option<[usize; 8]>,
}

impl<T> OctreeNode<T> {
  /// Create an empty leaf.
  pub fn new(center: Vec3, base_length: f32, looseness: f32) -> Self {
    Self {
      center,
      base_length,
      loose_bounds: Aabb::cube(center, base_length * looseness),
      entries: SmallVec::new(),
      children: None,
    }
  }

  /// Octant of `point` relative to this node's center.
  ///
  /// Octant bits represent +X, +Y, +Z halves:
  /// - bit 0: X (point.x > center.x)
  /// - bit 1: Y (point.y > center.y)
  /// - bit 2: Z (point.z > center.z)
  #[inline]
  pub fn octant_for(&self, point: Vec3) -> u8 {
    octant_of(self.center, point)
  }

  /// Center of the child cube in the given octant.
  #[inline]
  pub fn child_center(&self, octant: u8) -> Vec3 {
    self.center + octant_sign(octant) * (self.base_length * 0.25)
  }

  #[inline]
  pub fn has_children(&self) -> bool {
    self.children.is_some()
  }
}

/// Octant of `point` relative to `center` (see [`OctreeNode::octant_for`]).
#[inline]
pub fn octant_of(center: Vec3, point: Vec3) -> u8 {
  (point.x > center.x) as u8 | ((point.y > center.y) as u8) << 1 | ((point.z > center.z) as u8) << 2
}

/// Unit offset direction (each axis ±1) of an octant.
#[inline]
pub fn octant_sign(octant: u8) -> Vec3 {
  let axis = |bit: u8| if octant & bit != 0 { 1.0 } else { -1.0 };
  Vec3::new(axis(1), axis(2), axis(4))
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
