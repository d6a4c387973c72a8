//! Decal Projection Pipeline
//!
//! Turns a projector volume into an overlay mesh over static geometry.
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌───────────┐    ┌──────┐    ┌─────┐    ┌──────────┐
//! │ Colliders├───►│ OctreeCache ├───►│ Candidates├───►│ Clip ├───►│ Fan ├───►│ UV + lift│
//! └──────────┘    └─────────────┘    └───────────┘    └──────┘    └─────┘    └──────────┘
//!   (host query)   (once per mesh)    (cull by angle)  (6 planes)              (local space)
//! ```
//!
//! # Entry Points
//!
//! - [`project`]: one volume against already-resolved octrees
//! - [`rebuild`]: collider query + cache + project
//! - [`rebuild_batch`]: many volumes, octrees resolved serially, projection
//!   in parallel via rayon
//! - [`DecalProjector`]: dirty-flag entity wrapping `rebuild` and a
//!   [`MeshSink`](crate::MeshSink)

pub mod types;

pub mod batch;
pub mod decal;
pub mod projection;

// Test utilities
#[cfg(test)]
pub mod test_utils;

// End-to-end scenarios
#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

// Re-exports
pub use batch::rebuild_batch;
pub use decal::DecalProjector;
pub use projection::{project, rebuild};
pub use types::{ProjectionConfig, RebuildStats};
