use glam::{Affine3A, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::pipeline::projection::rebuild;
use crate::pipeline::test_utils::{collider, grid_mesh, single_quad_scene, CountingQuery};
use crate::projector::{DecalParams, ProjectorTransform};
use crate::source::ColliderSet;

fn random_volumes(rng: &mut StdRng, count: usize) -> Vec<ProjectorVolume> {
  (0..count)
    .map(|_| {
      let transform = ProjectorTransform::from_translation(Vec3::new(
        rng.random_range(-3.0..3.0),
        rng.random_range(-3.0..3.0),
        rng.random_range(-0.4..0.4),
      ))
      .with_rotation(Quat::from_rotation_z(rng.random_range(-3.0..3.0)))
      .with_scale(Vec3::splat(rng.random_range(0.5..2.0)));
      ProjectorVolume::new(&transform, &DecalParams::default())
    })
    .collect()
}

fn two_grid_scene() -> ColliderSet {
  vec![
    collider(grid_mesh(10, 0.4), Affine3A::IDENTITY),
    collider(
      grid_mesh(4, 0.5),
      Affine3A::from_translation(Vec3::new(2.0, 2.0, 0.1)),
    ),
  ]
  .into_iter()
  .collect()
}

#[test]
fn test_empty_batch() {
  let mut cache = OctreeCache::default();
  let scene = single_quad_scene(1.0);
  let results = rebuild_batch(&mut cache, &scene, &[], &ProjectionConfig::default());
  assert!(results.is_empty());
  assert!(cache.is_empty());
}

/// Parallel results equal one-by-one rebuilds, in input order.
#[test]
fn test_batch_matches_serial() {
  let mut rng = StdRng::seed_from_u64(99);
  let scene = two_grid_scene();
  let volumes = random_volumes(&mut rng, 64);
  let config = ProjectionConfig::default();

  let mut batch_cache = OctreeCache::default();
  let batch = rebuild_batch(&mut batch_cache, &scene, &volumes, &config);
  assert_eq!(batch.len(), volumes.len());

  let mut serial_cache = OctreeCache::default();
  for (volume, (mesh, stats)) in volumes.iter().zip(&batch) {
    let mut expected = DecalMesh::new();
    let serial = rebuild(&mut serial_cache, &scene, volume, &config, &mut expected);

    assert_eq!(mesh, &expected);
    assert_eq!(stats.colliders, serial.colliders);
    assert_eq!(stats.candidates, serial.candidates);
    assert_eq!(stats.culled, serial.culled);
    assert_eq!(stats.clipped_away, serial.clipped_away);
    assert_eq!(stats.triangles, serial.triangles);
  }
}

/// Octrees are built once in the serial phase, shared by every volume.
#[test]
fn test_batch_builds_each_mesh_once() {
  let mut rng = StdRng::seed_from_u64(5);
  let query = CountingQuery::new(two_grid_scene());
  let volumes = random_volumes(&mut rng, 32);
  let mut cache = OctreeCache::default();

  rebuild_batch(&mut cache, &query, &volumes, &ProjectionConfig::default());

  assert_eq!(query.calls.get(), volumes.len());
  assert!(cache.builds() <= 2);
  assert_eq!(cache.builds() as usize, cache.len());
}

#[test]
fn test_degenerate_volume_in_batch() {
  let scene = single_quad_scene(0.4);
  let volumes = vec![
    ProjectorVolume::new(&ProjectorTransform::default(), &DecalParams::default()),
    ProjectorVolume::new(
      &ProjectorTransform::default().with_scale(Vec3::ZERO),
      &DecalParams::default(),
    ),
  ];
  let mut cache = OctreeCache::default();
  let results = rebuild_batch(&mut cache, &scene, &volumes, &ProjectionConfig::default());

  assert_eq!(results[0].0.triangle_count(), 2);
  assert!(results[1].0.is_empty());
  assert_eq!(results[1].1.colliders, 0);
}
