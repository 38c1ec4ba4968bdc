//! Read-only transform pass over many timelines.
//!
//! Only reads timelines and writes one output slot per timeline, so it may run
//! in parallel (feature `parallel`). It must not overlap a load or a scheduler tick.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ghostline_core::{Quat, Timeline, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformSample {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

fn sample_one(timeline: &Timeline, time: f32, warp_distance: f32) -> Option<TransformSample> {
    timeline
        .query_with_warp(time, warp_distance)
        .map(|s| TransformSample {
            position: s.position,
            rotation: s.rotation,
            scale: s.local_scale,
        })
}

/// Transform of every timeline at `time`; `None` where `time` is outside a timeline's range.
pub fn sample_transforms(
    timelines: &[Timeline],
    time: f32,
    warp_distance: f32,
) -> Vec<Option<TransformSample>> {
    #[cfg(feature = "parallel")]
    {
        timelines
            .par_iter()
            .map(|tl| sample_one(tl, time, warp_distance))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        timelines
            .iter()
            .map(|tl| sample_one(tl, time, warp_distance))
            .collect()
    }
}
