//! Engine-agnostic metrics collection for decal rebuild statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use decal_plugin::metrics::{ProjectionMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // DecalProjector records every rebuild it performs:
//! projector.rebuild_if_dirty(&mut cache, &colliders, &config, &mut sink);
//! println!("avg {:.1} us", projector.metrics().avg_rebuild_timing_us());
//!
//! // Batch callers record the stats they get back:
//! metrics.record_rebuild(&stats);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::pipeline::RebuildStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  /// Create a new rolling window with the given capacity.
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  /// Get the most recent value.
  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
  pub fn sum(&self) -> T {
    self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Rebuild statistics accumulated across projectors and frames.
#[derive(Debug, Clone, Default)]
pub struct ProjectionMetrics {
  /// Rolling window of rebuild times in microseconds.
  pub rebuild_timings: RollingWindow<u64>,
  /// Rolling window of output triangle counts.
  pub triangle_counts: RollingWindow<u64>,

  /// Last rebuild time in microseconds.
  pub last_rebuild_us: u64,

  // Cumulative counters
  pub total_rebuilds: u64,
  pub total_candidates: u64,
  pub total_culled: u64,
  pub total_clipped_away: u64,
  pub total_triangles: u64,
}

impl ProjectionMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset windows and counters.
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Record one rebuild.
  pub fn record_rebuild(&mut self, stats: &RebuildStats) {
    if !is_enabled() {
      return;
    }
    self.rebuild_timings.push(stats.timing_us);
    self.triangle_counts.push(stats.triangles as u64);
    self.last_rebuild_us = stats.timing_us;

    self.total_rebuilds += 1;
    self.total_candidates += stats.candidates as u64;
    self.total_culled += stats.culled as u64;
    self.total_clipped_away += stats.clipped_away as u64;
    self.total_triangles += stats.triangles as u64;
  }

  pub fn avg_rebuild_timing_us(&self) -> f64 {
    self.rebuild_timings.average()
  }

  /// Fraction of candidates rejected by the incidence cull.
  pub fn cull_ratio(&self) -> f64 {
    if self.total_candidates == 0 {
      0.0
    } else {
      self.total_culled as f64 / self.total_candidates as f64
    }
  }
}
