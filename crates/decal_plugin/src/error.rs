//! Construction-time validation errors.
//!
//! The rebuild path itself never fails: degenerate geometry is skipped
//! silently. Errors only surface when a host hands in malformed buffers or
//! configuration.

use thiserror::Error;

/// Errors raised while validating meshes, parameters and octree settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecalError {
  #[error("invalid octree configuration: {reason}")]
  InvalidOctreeConfig { reason: String },

  #[error("index buffer length {count} is not a multiple of 3")]
  IndexCountNotTriangles { count: usize },

  #[error("triangle index {index} out of range for {vertex_count} vertices")]
  IndexOutOfRange { index: u32, vertex_count: usize },

  #[error("invalid decal parameters: {reason}")]
  InvalidParams { reason: String },
}

/// Result alias for fallible construction.
pub type Result<T> = std::result::Result<T, DecalError>;
