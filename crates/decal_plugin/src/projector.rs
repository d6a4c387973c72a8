//! Projector volume geometry.
//!
//! A decal projector is the unit cube `[-0.5, 0.5]^3` placed in the world by
//! a [`ProjectorTransform`]. Everything the pipeline needs (clip planes, UV
//! reference planes, query bounds, incidence threshold) is derived from the
//! transform on each rebuild and never cached.
//!
//! ```text
//!   right   = T(X * 0.5)       T = rotation * scale (no translation)
//!   up      = T(Y * 0.5)
//!   forward = T(Z * 0.5)       projection direction
//!
//!   corners = p ± right ± up ± forward
//! ```

use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::clipping::Plane;
use crate::constants::{CLIP_PLANE_COUNT, DEFAULT_MAX_ANGLE};
use crate::error::{DecalError, Result};
use crate::octree::Aabb;

/// Axis length below which the projector is treated as collapsed.
const MIN_AXIS_LENGTH: f32 = 1e-6;

// =============================================================================
// Inputs
// =============================================================================

/// World placement of a projector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectorTransform {
  pub translation: Vec3,
  pub rotation: Quat,
  pub scale: Vec3,
}

impl Default for ProjectorTransform {
  fn default() -> Self {
    Self {
      translation: Vec3::ZERO,
      rotation: Quat::IDENTITY,
      scale: Vec3::ONE,
    }
  }
}

impl ProjectorTransform {
  pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
    Self {
      translation,
      rotation,
      scale,
    }
  }

  pub fn from_translation(translation: Vec3) -> Self {
    Self {
      translation,
      ..Default::default()
    }
  }

  pub fn with_rotation(mut self, rotation: Quat) -> Self {
    self.rotation = rotation;
    self
  }

  pub fn with_scale(mut self, scale: Vec3) -> Self {
    self.scale = scale;
    self
  }

  /// Local-to-world transform.
  #[inline]
  pub fn to_affine(&self) -> Affine3A {
    Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
  }
}

/// Per-decal presentation parameters (persisted host state).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecalParams {
  /// UV repeat count per projector axis.
  pub uv_tiling: Vec2,
  /// UV offset added after tiling.
  pub uv_offset: Vec2,
  /// Rotation of the projected UVs, radians.
  pub uv_rotation: f32,
  /// Maximum angle (degrees) between a surface and the projection direction.
  pub max_angle: f32,
  /// Render sort offset, forwarded to the host untouched.
  pub z_offset: i32,
}

impl Default for DecalParams {
  fn default() -> Self {
    Self {
      uv_tiling: Vec2::ONE,
      uv_offset: Vec2::ZERO,
      uv_rotation: 0.0,
      max_angle: DEFAULT_MAX_ANGLE,
      z_offset: 0,
    }
  }
}

impl DecalParams {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_uv_tiling(mut self, tiling: Vec2) -> Self {
    self.uv_tiling = tiling;
    self
  }

  pub fn with_uv_offset(mut self, offset: Vec2) -> Self {
    self.uv_offset = offset;
    self
  }

  pub fn with_uv_rotation(mut self, radians: f32) -> Self {
    self.uv_rotation = radians;
    self
  }

  pub fn with_max_angle(mut self, degrees: f32) -> Self {
    self.max_angle = degrees;
    self
  }

  pub fn with_z_offset(mut self, z_offset: i32) -> Self {
    self.z_offset = z_offset;
    self
  }

  /// Reject non-finite UV settings and angles outside `[0, 180]`.
  pub fn validate(&self) -> Result<()> {
    if !self.uv_tiling.is_finite() {
      return Err(DecalError::InvalidParams {
        reason: format!("uv_tiling must be finite, got {}", self.uv_tiling),
      });
    }
    if !self.uv_offset.is_finite() {
      return Err(DecalError::InvalidParams {
        reason: format!("uv_offset must be finite, got {}", self.uv_offset),
      });
    }
    if !self.uv_rotation.is_finite() {
      return Err(DecalError::InvalidParams {
        reason: format!("uv_rotation must be finite, got {}", self.uv_rotation),
      });
    }
    if !(0.0..=180.0).contains(&self.max_angle) {
      return Err(DecalError::InvalidParams {
        reason: format!("max_angle must be within [0, 180], got {}", self.max_angle),
      });
    }
    Ok(())
  }
}

// =============================================================================
// Derived geometry
// =============================================================================

/// Oriented box handed to the host collision query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
  pub center: Vec3,
  pub half_extents: Vec3,
  pub rotation: Quat,
}

impl OrientedBox {
  /// World AABB enclosing the box.
  pub fn aabb(&self) -> Aabb {
    let axes = [
      self.rotation * Vec3::X * self.half_extents.x,
      self.rotation * Vec3::Y * self.half_extents.y,
      self.rotation * Vec3::Z * self.half_extents.z,
    ];
    let reach = axes[0].abs() + axes[1].abs() + axes[2].abs();
    Aabb::from_center_half_extents(self.center, reach)
  }
}

/// Geometry derived from a projector transform and its decal parameters.
#[derive(Clone, Debug)]
pub struct ProjectorVolume {
  position: Vec3,
  right: Vec3,
  up: Vec3,
  forward: Vec3,
  rotation: Quat,
  clip_planes: [Plane; CLIP_PLANE_COUNT],
  vertical_plane: Plane,
  horizontal_plane: Plane,
  cull_threshold: f32,
  world_to_local: Affine3A,
  params: DecalParams,
  degenerate: bool,
}

impl ProjectorVolume {
  pub fn new(transform: &ProjectorTransform, params: &DecalParams) -> Self {
    let to_world = transform.to_affine();
    let position = transform.translation;
    let right = to_world.transform_vector3(Vec3::X * 0.5);
    let up = to_world.transform_vector3(Vec3::Y * 0.5);
    let forward = to_world.transform_vector3(Vec3::Z * 0.5);

    let degenerate = [right, up, forward]
      .iter()
      .any(|axis| !axis.is_finite() || axis.length() < MIN_AXIS_LENGTH);

    let (clip_planes, vertical_plane, horizontal_plane, world_to_local) = if degenerate {
      (
        [Plane::REJECT_ALL; CLIP_PLANE_COUNT],
        Plane::REJECT_ALL,
        Plane::REJECT_ALL,
        Affine3A::IDENTITY,
      )
    } else {
      (
        [
          Plane::new(-right, position + right),
          Plane::new(right, position - right),
          Plane::new(-forward, position + forward),
          Plane::new(forward, position - forward),
          Plane::new(-up, position + up + forward),
          Plane::new(up, position - up + forward),
        ],
        Plane::new(right, position),
        Plane::new(up, position),
        to_world.inverse(),
      )
    };

    Self {
      position,
      right,
      up,
      forward,
      rotation: transform.rotation,
      clip_planes,
      vertical_plane,
      horizontal_plane,
      cull_threshold: (180.0 - params.max_angle).to_radians().cos(),
      world_to_local,
      params: *params,
      degenerate,
    }
  }

  /// Projector origin in world space.
  #[inline]
  pub fn position(&self) -> Vec3 {
    self.position
  }

  /// Half-length right axis in world space.
  #[inline]
  pub fn right(&self) -> Vec3 {
    self.right
  }

  /// Half-length up axis in world space.
  #[inline]
  pub fn up(&self) -> Vec3 {
    self.up
  }

  /// Half-length forward (projection) axis in world space.
  #[inline]
  pub fn forward(&self) -> Vec3 {
    self.forward
  }

  #[inline]
  pub fn params(&self) -> &DecalParams {
    &self.params
  }

  /// True when an axis has collapsed to zero length; such a volume
  /// contains nothing.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.degenerate
  }

  /// Inward-facing planes: right, left, back, front, top, bottom.
  #[inline]
  pub fn clip_planes(&self) -> &[Plane; CLIP_PLANE_COUNT] {
    &self.clip_planes
  }

  /// Plane through the origin with normal `right` (UV x reference).
  #[inline]
  pub fn vertical_plane(&self) -> &Plane {
    &self.vertical_plane
  }

  /// Plane through the origin with normal `up` (UV y reference).
  #[inline]
  pub fn horizontal_plane(&self) -> &Plane {
    &self.horizontal_plane
  }

  /// The eight box corners `p ± right ± up ± forward`.
  pub fn corners(&self) -> [Vec3; 8] {
    std::array::from_fn(|i| {
      let sx = if i & 1 != 0 { 1.0 } else { -1.0 };
      let sy = if i & 2 != 0 { 1.0 } else { -1.0 };
      let sz = if i & 4 != 0 { 1.0 } else { -1.0 };
      self.position + self.right * sx + self.up * sy + self.forward * sz
    })
  }

  /// World AABB of the box corners, used for the octree query.
  pub fn query_bounds(&self) -> Aabb {
    Aabb::from_points(&self.corners())
  }

  /// Box for the host collision query.
  pub fn oriented_box(&self) -> OrientedBox {
    OrientedBox {
      center: self.position,
      half_extents: Vec3::new(self.right.length(), self.up.length(), self.forward.length()),
      rotation: self.rotation,
    }
  }

  /// World-to-projector-local transform.
  #[inline]
  pub fn world_to_local(&self) -> &Affine3A {
    &self.world_to_local
  }

  /// `cos(180° - max_angle)`: faces whose normal dotted with the reverse
  /// projection direction falls at or below this are culled.
  #[inline]
  pub fn cull_threshold(&self) -> f32 {
    self.cull_threshold
  }

  /// Incidence test for a source face normal.
  ///
  /// Zero normals are rejected. At the default 89° a face perpendicular to
  /// the projection direction passes, a face pointing along it does not.
  #[inline]
  pub fn accepts_normal(&self, normal: Vec3) -> bool {
    if normal == Vec3::ZERO {
      return false;
    }
    let towards_projector = -self.forward.normalize_or_zero();
    normal.dot(towards_projector) > self.cull_threshold
  }

  /// Projected UV of a world-space point.
  ///
  /// Distances to the reference planes are measured in projector-local
  /// units, so the box faces sit at ±0.5 and default tiling maps the box to
  /// `[0, 1]²`.
  pub fn uv_for(&self, point: Vec3) -> Vec2 {
    let mut local = Vec2::new(
      self.vertical_plane.signed_distance(point) / (self.right.length() * 2.0),
      self.horizontal_plane.signed_distance(point) / (self.up.length() * 2.0),
    );
    if self.params.uv_rotation != 0.0 {
      local = Vec2::from_angle(self.params.uv_rotation).rotate(local);
    }

    let tiling = self.params.uv_tiling;
    let offset = self.params.uv_offset;
    Vec2::new(
      local.x * tiling.x + (tiling.x * 0.5 + offset.x),
      local.y * tiling.y + (tiling.y * 0.5 + offset.y),
    )
  }
}

#[cfg(test)]
#[path = "projector_test.rs"]
mod projector_test;
