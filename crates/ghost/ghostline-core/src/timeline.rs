//! Time-indexed snapshot sequence with interpolated point queries.

use std::cmp::Ordering;

use crate::interp::functions::{inverse_lerp, step};
use crate::interp::lerp;
use crate::snapshot::Snapshot;

/// Sorted `(time, Snapshot)` samples for one actor. Read-only once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    times: Vec<f32>,
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered samples. Duplicate times keep the sample written last;
    /// NaN times are dropped.
    pub fn from_samples(samples: Vec<(f32, Snapshot)>) -> Self {
        let mut samples: Vec<(f32, Snapshot)> = samples
            .into_iter()
            .filter(|(t, _)| {
                if t.is_nan() {
                    log::warn!("timeline: dropping sample with NaN time");
                }
                !t.is_nan()
            })
            .collect();
        // Stable sort keeps write order among equal times.
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut times: Vec<f32> = Vec::with_capacity(samples.len());
        let mut snapshots: Vec<Snapshot> = Vec::with_capacity(samples.len());
        for (t, snapshot) in samples {
            match times.last() {
                Some(last) if *last == t => {
                    if let Some(slot) = snapshots.last_mut() {
                        *slot = snapshot;
                    }
                }
                _ => {
                    times.push(t);
                    snapshots.push(snapshot);
                }
            }
        }
        Self { times, snapshots }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, &Snapshot)> + '_ {
        self.times.iter().copied().zip(self.snapshots.iter())
    }

    pub fn start_time(&self) -> Option<f32> {
        self.times.first().copied()
    }

    pub fn end_time(&self) -> Option<f32> {
        self.times.last().copied()
    }

    /// Whether `t` lies inside the recorded range (inclusive).
    pub fn contains(&self, t: f32) -> bool {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => start <= t && t <= end,
            _ => false,
        }
    }

    /// Recorded samples with `start <= time <= end`, in time order.
    pub fn samples_between(
        &self,
        start: f32,
        end: f32,
    ) -> impl Iterator<Item = (f32, &Snapshot)> + '_ {
        let lo = self.times.partition_point(|x| *x < start);
        let hi = self.times.partition_point(|x| *x <= end).max(lo);
        self.times[lo..hi]
            .iter()
            .copied()
            .zip(self.snapshots[lo..hi].iter())
    }

    /// Snapshot at `t`, interpolated between the bracketing samples.
    /// `None` outside the recorded range.
    pub fn query(&self, t: f32) -> Option<Snapshot> {
        self.query_with_warp(t, f32::INFINITY)
    }

    /// Like [`Timeline::query`], but bracketing samples whose positions are at least
    /// `warp_distance` apart are treated as a teleport: the nearer endpoint is
    /// returned instead of a blend.
    pub fn query_with_warp(&self, t: f32, warp_distance: f32) -> Option<Snapshot> {
        // NaN compares as "less" everywhere, which lands past the end.
        let search = self
            .times
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap_or(Ordering::Less));
        match search {
            Ok(i) => self.snapshots.get(i).cloned(),
            Err(0) => None,
            Err(i) if i >= self.times.len() => None,
            Err(i) => {
                let (a, b) = (&self.snapshots[i - 1], &self.snapshots[i]);
                let local_t = inverse_lerp(self.times[i - 1], self.times[i], t);
                if a.distance_squared(b) >= warp_distance * warp_distance {
                    Some(step(a, b, local_t).clone())
                } else {
                    Some(lerp(a, b, local_t))
                }
            }
        }
    }
}

impl FromIterator<(f32, Snapshot)> for Timeline {
    fn from_iter<I: IntoIterator<Item = (f32, Snapshot)>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}
