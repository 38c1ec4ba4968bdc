#![allow(dead_code)]

use ghostline_core::{ParameterState, Quat, UpdateMode, Vec3};
use ghostline_playback::{Actor, AnimationController, ClipInfo};

/// Everything a mock controller was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    TimeScale(f32),
    Speed(f32),
    UpdateMode(UpdateMode),
    Play {
        layer: i32,
        hash: i32,
        normalized_time: f32,
    },
    Parameter(ParameterState),
    Update(f32),
}

#[derive(Debug, Default)]
pub struct MockController {
    pub calls: Vec<Call>,
    pub clip: Option<ClipInfo>,
}

impl AnimationController for MockController {
    fn set_time_scale(&mut self, time_scale: f32) {
        self.calls.push(Call::TimeScale(time_scale));
    }

    fn set_speed(&mut self, speed: f32) {
        self.calls.push(Call::Speed(speed));
    }

    fn set_update_mode(&mut self, mode: UpdateMode) {
        self.calls.push(Call::UpdateMode(mode));
    }

    fn clip_info(&self, _layer_index: i32, _state_hash: i32) -> Option<ClipInfo> {
        self.clip
    }

    fn play(&mut self, layer_index: i32, state_hash: i32, normalized_time: f32) {
        self.calls.push(Call::Play {
            layer: layer_index,
            hash: state_hash,
            normalized_time,
        });
    }

    fn set_parameter(&mut self, parameter: &ParameterState) {
        self.calls.push(Call::Parameter(*parameter));
    }

    fn update(&mut self, delta_time: f32) {
        self.calls.push(Call::Update(delta_time));
    }
}

#[derive(Debug, Default)]
pub struct MockActor {
    pub active: Option<bool>,
    pub transform: Option<(Vec3, Quat, Vec3)>,
    pub restores: usize,
    pub controller: Option<MockController>,
}

impl MockActor {
    pub fn animated() -> Self {
        Self {
            controller: Some(MockController::default()),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        self.transform.map(|(p, _, _)| p)
    }
}

impl Actor for MockActor {
    fn set_active(&mut self, active: bool) {
        self.active = Some(active);
    }

    fn set_transform(&mut self, position: Vec3, rotation: Quat, scale: Vec3) {
        self.transform = Some((position, rotation, scale));
        self.restores += 1;
    }

    fn animator(&mut self) -> Option<&mut dyn AnimationController> {
        self.controller
            .as_mut()
            .map(|c| c as &mut dyn AnimationController)
    }
}

pub fn actors(n: usize) -> Vec<MockActor> {
    (0..n).map(|_| MockActor::default()).collect()
}
