//! Push a reconstructed snapshot into an actor.

use ghostline_core::{LayerState, Snapshot};

use crate::actor::{Actor, ClipInfo};

/// Normalized progress of `layer` at `query_time`, advancing it from the time it
/// was captured.
///
/// The elapsed time is scaled by the controller speed, the clip's own speed and
/// the time scale. Looping clips wrap into `[0, 1)`; other clips clamp to `[0, 1]`.
/// Without clip facts (or with a non-positive length) the recorded value is kept.
pub fn corrected_normalized_time(
    layer: &LayerState,
    clip: Option<ClipInfo>,
    speed: f32,
    time_scale: f32,
    query_time: f32,
) -> f32 {
    let Some(clip) = clip else {
        return layer.normalized_time;
    };
    if !(clip.length > 0.0) {
        return layer.normalized_time;
    }
    let elapsed = (query_time - layer.capture_time) * speed * clip.speed * time_scale;
    let progress = layer.normalized_time + elapsed / clip.length;
    if !progress.is_finite() {
        return layer.normalized_time;
    }
    if clip.looping {
        progress.rem_euclid(1.0)
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Apply `snapshot` to `actor` as it should look at `query_time`.
///
/// The transform is always written. Actors with an animation controller also get
/// time scale, speed, update mode, every layer (elapsed-corrected) and every
/// parameter, followed by a zero-length update to evaluate the pose.
pub fn restore<A: Actor + ?Sized>(actor: &mut A, snapshot: &Snapshot, query_time: f32) {
    actor.set_transform(snapshot.position, snapshot.rotation, snapshot.local_scale);

    let Some(animator) = actor.animator() else {
        return;
    };
    animator.set_time_scale(snapshot.time_scale);
    animator.set_speed(snapshot.speed);
    animator.set_update_mode(snapshot.update_mode);

    for layer in &snapshot.layers {
        let clip = animator.clip_info(layer.layer_index, layer.state_hash);
        let normalized_time = corrected_normalized_time(
            layer,
            clip,
            snapshot.speed,
            snapshot.time_scale,
            query_time,
        );
        animator.play(layer.layer_index, layer.state_hash, normalized_time);
    }
    for parameter in &snapshot.parameters {
        animator.set_parameter(parameter);
    }
    animator.update(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn clip(looping: bool) -> Option<ClipInfo> {
        Some(ClipInfo {
            length: 2.0,
            speed: 1.0,
            looping,
        })
    }

    #[test]
    fn advances_by_elapsed_time() {
        let layer = LayerState::new(0, 1, 0.25).captured_at(1.0);
        let nt = corrected_normalized_time(&layer, clip(false), 1.0, 1.0, 2.0);
        assert!((nt - 0.75).abs() < EPS);
    }

    #[test]
    fn loops_and_clamps() {
        let layer = LayerState::new(0, 1, 0.5).captured_at(0.0);
        let looped = corrected_normalized_time(&layer, clip(true), 2.0, 1.0, 2.0);
        assert!((looped - 0.5).abs() < EPS);
        let clamped = corrected_normalized_time(&layer, clip(false), 2.0, 1.0, 2.0);
        assert_eq!(clamped, 1.0);
    }

    #[test]
    fn unknown_clip_keeps_recorded_time() {
        let layer = LayerState::new(0, 1, 0.3).captured_at(0.0);
        assert_eq!(corrected_normalized_time(&layer, None, 1.0, 1.0, 5.0), 0.3);
        let zero = Some(ClipInfo {
            length: 0.0,
            speed: 1.0,
            looping: true,
        });
        assert_eq!(corrected_normalized_time(&layer, zero, 1.0, 1.0, 5.0), 0.3);
    }
}
