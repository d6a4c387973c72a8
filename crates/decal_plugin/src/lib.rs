//! decal_plugin - Framework/engine independent decal projection
//!
//! This crate projects a decal (a thin oriented box volume) onto static
//! triangle geometry and produces an overlay mesh that hugs that geometry.
//!
//! # Features
//!
//! - **Loose Bounds Octree**: Per-mesh spatial index over world-space
//!   triangles, built once and cached
//! - **Convex Clipping**: Sutherland-Hodgman clipping of each candidate
//!   triangle against the six faces of the projector box
//! - **Fan Triangulation**: Clipped convex polygons back into triangles
//! - **Projected UVs**: Tiling/offset/rotation relative to the projector, with
//!   a small lift along the surface normal against z-fighting
//!
//! # Example
//!
//! ```ignore
//! use decal_plugin::{
//!   pipeline::rebuild, ColliderSet, DecalMesh, DecalParams, OctreeCache, ProjectionConfig,
//!   ProjectorTransform, ProjectorVolume,
//! };
//!
//! let mut cache = OctreeCache::default();
//! let volume = ProjectorVolume::new(&ProjectorTransform::default(), &DecalParams::default());
//!
//! let mut output = DecalMesh::new();
//! let stats = rebuild(&mut cache, &colliders, &volume, &ProjectionConfig::default(), &mut output);
//!
//! println!("Generated {} triangles from {} candidates",
//!     output.triangle_count(), stats.candidates);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::DecalError;
pub use types::{DecalMesh, Triangle};

// Spatial index
pub mod octree;
pub use octree::{Aabb, BoundsOctree, OctreeConfig};

// Polygon clipping and triangulation
pub mod clipping;
pub mod triangulate;
pub use clipping::{ClipPolygon, ClipScratch, Plane};

// Projector geometry
pub mod projector;
pub use projector::{DecalParams, OrientedBox, ProjectorTransform, ProjectorVolume};

// Host collaborators (collision query, mesh sink)
pub mod source;
pub use source::{Collider, ColliderKey, ColliderQuery, ColliderSet, MeshId, MeshSink, SourceMesh};

// Per-mesh octree cache
pub mod cache;
pub use cache::OctreeCache;

// Projection pipeline
pub mod pipeline;
pub use pipeline::{DecalProjector, ProjectionConfig, RebuildStats};

pub mod metrics;
