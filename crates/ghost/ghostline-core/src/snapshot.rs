//! Snapshot data model: one actor's transform and animation-controller state at an instant.
//!
//! Vectors are `[x, y, z]` and rotations are quaternions `[x, y, z, w]`, matching the
//! array layout used by the interpolation helpers.

use serde::{Deserialize, Serialize};

use crate::error::GhostError;

pub type Vec3 = [f32; 3];
/// Quaternion (x, y, z, w)
pub type Quat = [f32; 4];

pub const IDENTITY_ROTATION: Quat = [0.0, 0.0, 0.0, 1.0];
pub const ZERO_VEC3: Vec3 = [0.0, 0.0, 0.0];
pub const ONE_VEC3: Vec3 = [1.0, 1.0, 1.0];

/// How the animation controller advances relative to engine time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Normal,
    AnimatePhysics,
    UnscaledTime,
}

impl UpdateMode {
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            UpdateMode::Normal => 0,
            UpdateMode::AnimatePhysics => 1,
            UpdateMode::UnscaledTime => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(UpdateMode::Normal),
            1 => Some(UpdateMode::AnimatePhysics),
            2 => Some(UpdateMode::UnscaledTime),
            _ => None,
        }
    }
}

/// Type of an animation-controller parameter.
///
/// Wire codes follow the host controller numbering (Float = 1, Int = 3, Bool = 4,
/// Trigger = 9), so raw type values reported by a host can be passed straight through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Float,
    Int,
    Bool,
    Trigger,
}

impl ParameterKind {
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            ParameterKind::Float => 1,
            ParameterKind::Int => 3,
            ParameterKind::Bool => 4,
            ParameterKind::Trigger => 9,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, GhostError> {
        match code {
            1 => Ok(ParameterKind::Float),
            3 => Ok(ParameterKind::Int),
            4 => Ok(ParameterKind::Bool),
            9 => Ok(ParameterKind::Trigger),
            _ => Err(GhostError::UnhandledParameterType { code }),
        }
    }
}

/// Active state of one animation layer.
///
/// Equality ignores `capture_time`: two layer states are the same when they play
/// the same state at the same progress.
#[derive(Copy, Clone, Debug)]
pub struct LayerState {
    pub layer_index: i32,
    /// Identifies the active clip/state on this layer.
    pub state_hash: i32,
    /// Playback progress, generally in [0, 1).
    pub normalized_time: f32,
    /// Absolute time at which this layer state was captured.
    pub capture_time: f32,
}

impl LayerState {
    pub fn new(layer_index: i32, state_hash: i32, normalized_time: f32) -> Self {
        Self {
            layer_index,
            state_hash,
            normalized_time,
            capture_time: 0.0,
        }
    }

    pub fn captured_at(mut self, capture_time: f32) -> Self {
        self.capture_time = capture_time;
        self
    }
}

impl PartialEq for LayerState {
    fn eq(&self, other: &Self) -> bool {
        self.layer_index == other.layer_index
            && self.state_hash == other.state_hash
            && self.normalized_time == other.normalized_time
    }
}

/// Identity of a parameter inside a snapshot's parameter set.
pub type ParameterKey = (i32, ParameterKind);

/// The semantically active value of a parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Int(i32),
    Bool(bool),
}

/// One animation-controller parameter. Exactly one value field is active, selected by `kind`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterState {
    pub id: i32,
    pub kind: ParameterKind,
    pub float_value: f32,
    pub int_value: i32,
    pub bool_value: bool,
}

impl ParameterState {
    fn blank(id: i32, kind: ParameterKind) -> Self {
        Self {
            id,
            kind,
            float_value: 0.0,
            int_value: 0,
            bool_value: false,
        }
    }

    pub fn float(id: i32, value: f32) -> Self {
        Self {
            float_value: value,
            ..Self::blank(id, ParameterKind::Float)
        }
    }

    pub fn int(id: i32, value: i32) -> Self {
        Self {
            int_value: value,
            ..Self::blank(id, ParameterKind::Int)
        }
    }

    pub fn boolean(id: i32, value: bool) -> Self {
        Self {
            bool_value: value,
            ..Self::blank(id, ParameterKind::Bool)
        }
    }

    pub fn trigger(id: i32, value: bool) -> Self {
        Self {
            bool_value: value,
            ..Self::blank(id, ParameterKind::Trigger)
        }
    }

    /// Build a parameter of `kind` from its active value.
    ///
    /// Ints are accepted for Float parameters and floats are truncated for Int
    /// parameters; booleans only fit Bool/Trigger.
    pub fn from_value(
        id: i32,
        kind: ParameterKind,
        value: ParameterValue,
    ) -> Result<Self, GhostError> {
        match (kind, value) {
            (ParameterKind::Float, ParameterValue::Float(v)) => Ok(Self::float(id, v)),
            (ParameterKind::Float, ParameterValue::Int(v)) => Ok(Self::float(id, v as f32)),
            (ParameterKind::Int, ParameterValue::Int(v)) => Ok(Self::int(id, v)),
            (ParameterKind::Int, ParameterValue::Float(v)) => Ok(Self::int(id, v as i32)),
            (ParameterKind::Bool, ParameterValue::Bool(v)) => Ok(Self::boolean(id, v)),
            (ParameterKind::Trigger, ParameterValue::Bool(v)) => Ok(Self::trigger(id, v)),
            (kind, value) => Err(GhostError::malformed(format!(
                "parameter {id}: value {value:?} does not fit kind {kind:?}"
            ))),
        }
    }

    #[inline]
    pub fn key(&self) -> ParameterKey {
        (self.id, self.kind)
    }

    #[inline]
    pub fn value(&self) -> ParameterValue {
        match self.kind {
            ParameterKind::Float => ParameterValue::Float(self.float_value),
            ParameterKind::Int => ParameterValue::Int(self.int_value),
            ParameterKind::Bool | ParameterKind::Trigger => ParameterValue::Bool(self.bool_value),
        }
    }
}

/// Full captured state of one actor at one instant.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Local time-dilation factor.
    pub time_scale: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub local_scale: Vec3,
    /// Animation playback speed multiplier.
    pub speed: f32,
    pub update_mode: UpdateMode,
    /// One entry per controller layer; index is meaningful.
    pub layers: Vec<LayerState>,
    /// Keyed by (id, kind). Order is kept for serialization only.
    pub parameters: Vec<ParameterState>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            position: ZERO_VEC3,
            rotation: IDENTITY_ROTATION,
            local_scale: ONE_VEC3,
            speed: 1.0,
            update_mode: UpdateMode::Normal,
            layers: Vec::new(),
            parameters: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Transform-only snapshot (no animation controller state).
    pub fn from_transform(position: Vec3, rotation: Quat, local_scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            local_scale,
            ..Self::default()
        }
    }

    pub fn layer(&self, layer_index: i32) -> Option<&LayerState> {
        self.layers.iter().find(|l| l.layer_index == layer_index)
    }

    pub fn parameter(&self, key: ParameterKey) -> Option<&ParameterState> {
        self.parameters.iter().find(|p| p.key() == key)
    }

    /// Squared straight-line distance between two snapshots' positions.
    pub fn distance_squared(&self, other: &Snapshot) -> f32 {
        let dx = other.position[0] - self.position[0];
        let dy = other.position[1] - self.position[1];
        let dz = other.position[2] - self.position[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn same_parameter_set(a: &[ParameterState], b: &[ParameterState]) -> bool {
    a.len() == b.len() && a.iter().all(|pa| b.iter().any(|pb| pa == pb))
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.time_scale == other.time_scale
            && self.position == other.position
            && self.rotation == other.rotation
            && self.local_scale == other.local_scale
            && self.speed == other.speed
            && self.update_mode == other.update_mode
            && self.layers == other.layers
            && same_parameter_set(&self.parameters, &other.parameters)
    }
}
