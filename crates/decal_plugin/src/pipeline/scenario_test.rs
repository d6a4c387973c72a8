//! End-to-end scenarios across cache, octree, clipper and triangulator.

use glam::{Affine3A, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::test_utils::{collider, grid_mesh, quad_mesh, triangle_mesh};
use super::{rebuild, ProjectionConfig, RebuildStats};
use crate::cache::OctreeCache;
use crate::octree::OctreeConfig;
use crate::projector::{DecalParams, ProjectorTransform, ProjectorVolume};
use crate::source::{ColliderSet, MeshId, SourceMesh};
use crate::triangulate::polygon_area;
use crate::types::{DecalMesh, Triangle};

fn run(scene: &ColliderSet, transform: &ProjectorTransform) -> (DecalMesh, RebuildStats) {
  let volume = ProjectorVolume::new(transform, &DecalParams::default());
  let mut output = DecalMesh::new();
  let stats = rebuild(
    &mut OctreeCache::default(),
    scene,
    &volume,
    &ProjectionConfig::default(),
    &mut output,
  );
  (output, stats)
}

/// Flat square (two triangles) inside a box aligned with its normal:
/// exactly 2 triangles, UVs within the unit square.
#[test]
fn test_square_inside_aligned_box() {
  let scene: ColliderSet = std::iter::once(collider(quad_mesh(0.45), Affine3A::IDENTITY)).collect();
  let (output, _) = run(&scene, &ProjectorTransform::default());

  assert_eq!(output.triangle_count(), 2);
  for uv in &output.uvs {
    assert!(uv.cmpge(Vec2::ZERO).all() && uv.cmple(Vec2::ONE).all());
  }
}

/// Only about 10% of one triangle overlaps the box: a small convex region,
/// 1-3 triangles, all inside the box.
#[test]
fn test_box_overlapping_a_tenth_of_a_triangle() {
  // Facing -Z, area 8
  let big = triangle_mesh(
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 4.0, 0.0),
    Vec3::new(4.0, 0.0, 0.0),
  );
  let scene: ColliderSet = std::iter::once(collider(big, Affine3A::IDENTITY)).collect();
  let transform = ProjectorTransform::from_translation(Vec3::new(0.4, 0.4, 0.0));
  let (output, stats) = run(&scene, &transform);

  assert!((1..=3).contains(&output.triangle_count()), "{} triangles", output.triangle_count());
  assert_eq!(stats.candidates, 1);

  // Overlap is [0, 0.9]²: 0.81 of 8 ≈ 10%
  let area: f32 = output.vertices.chunks_exact(3).map(polygon_area).sum();
  assert!((area - 0.81).abs() < 1e-3);

  for vertex in &output.vertices {
    assert!(vertex.x >= -0.5 - 1e-4 && vertex.x <= 0.5 + 1e-4);
    assert!(vertex.y >= -0.5 - 1e-4 && vertex.y <= 0.5 + 1e-4);
    assert!(vertex.z.abs() <= 0.5);
  }
}

/// A face perpendicular to the projection axis survives the default 89°
/// cull; a face pointing along the axis does not.
#[test]
fn test_perpendicular_kept_back_face_culled() {
  // Normal -Y: normal · forward = 0
  let perpendicular = triangle_mesh(
    Vec3::new(-0.3, 0.0, -0.3),
    Vec3::new(0.3, 0.0, -0.3),
    Vec3::new(0.0, 0.0, 0.3),
  );
  let scene: ColliderSet = std::iter::once(collider(perpendicular, Affine3A::IDENTITY)).collect();
  let (output, stats) = run(&scene, &ProjectorTransform::default());
  assert_eq!(stats.culled, 0);
  assert_eq!(output.triangle_count(), 1);

  // Normal +Z: normal · forward = 1
  let back_face = triangle_mesh(
    Vec3::new(-0.3, -0.3, 0.0),
    Vec3::new(0.3, -0.3, 0.0),
    Vec3::new(0.0, 0.3, 0.0),
  );
  let scene: ColliderSet = std::iter::once(collider(back_face, Affine3A::IDENTITY)).collect();
  let (output, stats) = run(&scene, &ProjectorTransform::default());
  assert_eq!(stats.culled, 1);
  assert!(output.is_empty());
}

/// Exact bit pattern of a triangle's vertices, for set comparison.
fn sort_key(triangle: &Triangle) -> [[u32; 3]; 3] {
  triangle.vertices().map(|v| v.to_array().map(f32::to_bits))
}

/// 10,000 random triangles, projector boxes covering 1% of the space, 100
/// trials: the candidate set equals a linear scan over the triangles.
#[test]
fn test_candidates_match_linear_scan() {
  const EXTENT: f32 = 50.0;
  let mut rng = StdRng::seed_from_u64(2024);

  let mut positions = Vec::with_capacity(30_000);
  for _ in 0..10_000 {
    let base = Vec3::new(
      rng.random_range(-EXTENT..EXTENT),
      rng.random_range(-EXTENT..EXTENT),
      rng.random_range(-EXTENT..EXTENT),
    );
    positions.push(base);
    positions.push(base + Vec3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0));
    positions.push(base + Vec3::new(0.0, rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)));
  }
  let indices: Vec<u32> = (0..positions.len() as u32).collect();
  let soup = SourceMesh::new(MeshId::new(), positions, indices).unwrap();
  let scene: ColliderSet = std::iter::once(collider(soup, Affine3A::IDENTITY)).collect();
  let triangles: Vec<Triangle> = scene.iter().flat_map(|c| c.world_triangles()).collect();
  let key = scene.iter().map(|c| c.key()).next().expect("one collider");

  let config = OctreeConfig::default().with_initial_size(EXTENT * 2.0);
  let mut cache = OctreeCache::new(config).unwrap();
  let edge = EXTENT * 2.0 * 0.01f32.cbrt();

  for trial in 0..100 {
    let transform = ProjectorTransform::from_translation(Vec3::new(
      rng.random_range(-EXTENT..EXTENT),
      rng.random_range(-EXTENT..EXTENT),
      rng.random_range(-EXTENT..EXTENT),
    ))
    .with_scale(Vec3::splat(edge));
    let volume = ProjectorVolume::new(&transform, &DecalParams::default());
    let query = volume.query_bounds();

    let mut expected: Vec<_> = triangles
      .iter()
      .filter(|t| t.bounds().intersects(&query))
      .map(sort_key)
      .collect();
    expected.sort_unstable();

    let mut output = DecalMesh::new();
    let stats = rebuild(&mut cache, &scene, &volume, &ProjectionConfig::default(), &mut output);
    assert_eq!(stats.candidates, expected.len(), "trial {}", trial);

    // Same set, not just the same count, from the tree the rebuild used
    let tree = cache.get(&key).expect("tree built by rebuild");
    let mut found: Vec<_> = tree.colliding(&query).into_iter().map(sort_key).collect();
    found.sort_unstable();
    assert_eq!(found, expected, "trial {}", trial);
  }
  assert_eq!(cache.builds(), 1);
}

/// Two rebuilds with nothing changed produce identical buffers.
#[test]
fn test_rebuild_is_idempotent() {
  let scene: ColliderSet = vec![
    collider(grid_mesh(8, 0.3), Affine3A::IDENTITY),
    collider(
      grid_mesh(3, 0.6),
      Affine3A::from_rotation_translation(Quat::from_rotation_x(0.4), Vec3::new(0.5, 0.0, 0.2)),
    ),
  ]
  .into_iter()
  .collect();
  let transform = ProjectorTransform::from_translation(Vec3::new(0.2, -0.1, 0.0))
    .with_rotation(Quat::from_euler(glam::EulerRot::XYZ, 0.2, -0.1, 0.9))
    .with_scale(Vec3::new(1.5, 1.0, 1.2));
  let volume = ProjectorVolume::new(&transform, &DecalParams::default());
  let config = ProjectionConfig::default();

  let mut cache = OctreeCache::default();
  let mut first = DecalMesh::new();
  let mut second = DecalMesh::new();
  rebuild(&mut cache, &scene, &volume, &config, &mut first);
  rebuild(&mut cache, &scene, &volume, &config, &mut second);
  assert!(!first.is_empty());
  assert_eq!(first, second);

  // A fresh cache yields the same buffers too
  let mut third = DecalMesh::new();
  rebuild(&mut OctreeCache::default(), &scene, &volume, &config, &mut third);
  assert_eq!(first, third);
}
