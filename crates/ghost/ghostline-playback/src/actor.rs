//! Capabilities a host actor exposes to the replay machinery.

use ghostline_core::{ParameterState, Quat, UpdateMode, Vec3};

/// Static facts about the clip playing in one layer state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipInfo {
    /// Clip length in seconds.
    pub length: f32,
    /// Per-state playback speed multiplier.
    pub speed: f32,
    pub looping: bool,
}

/// Animation backend driving an actor's pose.
pub trait AnimationController {
    fn set_time_scale(&mut self, time_scale: f32);

    fn set_speed(&mut self, speed: f32);

    fn set_update_mode(&mut self, mode: UpdateMode);

    /// Clip facts for `state_hash` on `layer_index`, if the backend knows the state.
    fn clip_info(&self, layer_index: i32, state_hash: i32) -> Option<ClipInfo>;

    /// Jump `layer_index` to `state_hash` at `normalized_time`.
    fn play(&mut self, layer_index: i32, state_hash: i32, normalized_time: f32);

    /// Apply a parameter value. For triggers, `bool_value == true` sets and `false` resets.
    fn set_parameter(&mut self, parameter: &ParameterState);

    /// Advance by `delta_time` seconds and evaluate the pose. `0.0` only re-evaluates.
    fn update(&mut self, delta_time: f32);
}

/// One replayed actor.
pub trait Actor {
    /// Show or hide the actor. Hidden actors are outside their recorded range.
    fn set_active(&mut self, active: bool);

    fn set_transform(&mut self, position: Vec3, rotation: Quat, scale: Vec3);

    /// Transform-only actors have no controller.
    fn animator(&mut self) -> Option<&mut dyn AnimationController> {
        None
    }
}
