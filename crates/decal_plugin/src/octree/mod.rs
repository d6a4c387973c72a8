//! Octree module for spatial lookup of source triangles.
//!
//! A loose bounds octree: every node tests containment against its cube
//! scaled by a looseness factor (> 1.0 inflates the cube), so payloads that
//! straddle a split plane can still sink into a child instead of piling up in
//! the parent.
//!
//! # Module Structure
//!
//! - [`bounds`]: `Aabb` - axis-aligned bounds for payloads, nodes and queries
//! - [`config`]: `OctreeConfig` - initial size/center, subdivision floor,
//!   looseness
//! - [`node`]: `OctreeNode` - arena node with children by index
//! - [`tree`]: `BoundsOctree` - insertion, growth, collision queries

pub mod bounds;
pub mod config;
pub mod node;
pub mod tree;

// Re-exports
pub use bounds::Aabb;
pub use config::OctreeConfig;
pub use node::OctreeNode;
pub use tree::BoundsOctree;
