//! Numeric constants shared by the clipper, octree and projection pipeline.
//!
//! # Clip Volume
//!
//! ```text
//!             +u
//!              │   +f (projection direction)
//!              │  ╱
//!       ┌──────┼─╱────┐
//!       │      │╱     │      6 clip planes, normals point inwards:
//!  -r ──┼──────p──────┼── +r    ±r (right)  ±f (forward)  ±u (up)
//!       │             │
//!       └─────────────┘
//!              │
//!             -u
//! ```
//!
//! A triangle clipped by 6 half-spaces gains at most one vertex per plane,
//! so the clipped polygon never exceeds `3 + CLIP_PLANE_COUNT` vertices.

/// Number of half-spaces bounding the projector volume.
pub const CLIP_PLANE_COUNT: usize = 6;

/// Capacity of a clipped polygon: 3 triangle vertices + 1 per clip plane.
pub const MAX_CLIP_VERTICES: usize = 3 + CLIP_PLANE_COUNT;

/// Signed distance band treated as "on the plane" (counts as inside).
pub const PLANE_EPSILON: f32 = 1e-3;

/// Lift applied along the surface normal to avoid z-fighting (world units).
pub const DEFAULT_SURFACE_OFFSET: f32 = 0.002;

/// Default maximum incidence angle in degrees.
pub const DEFAULT_MAX_ANGLE: f32 = 89.0;

// =============================================================================
// Octree
// =============================================================================

/// Entries a node holds before it attempts to split.
pub const MAX_ENTRIES_PER_NODE: usize = 8;

/// Root growth attempts before an insert is abandoned.
pub const MAX_GROW_ATTEMPTS: usize = 20;

/// Default edge length of a freshly seeded octree root.
pub const DEFAULT_OCTREE_SIZE: f32 = 16.0;

/// Default subdivision floor.
pub const DEFAULT_MIN_NODE_SIZE: f32 = 1.0;

/// Default looseness (1.0 = tight octree, 2.0 = maximum).
pub const DEFAULT_LOOSENESS: f32 = 1.25;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
