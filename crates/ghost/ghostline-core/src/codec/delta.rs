//! Sparse delta record: only the fields that changed against the codec baseline.
//!
//! JSON layout (short keys keep long captures small):
//!
//! ```text
//! {
//!   "ts":   1.0,                     time scale
//!   "pos":  { "y": 2.0 },            changed position components only
//!   "rot":  { "x": .., "w": .. },    changed rotation components only
//!   "scl":  { "z": 0.5 },            changed scale components only
//!   "spd":  2.0,                     controller speed
//!   "um":   1,                       update mode code
//!   "lyrs": [[index, hash, normalizedTime, captureTime?], ...],
//!   "prms": [[id, typeCode, value], ...]
//! }
//! ```

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rounding::FloatRounder;
use crate::snapshot::{LayerState, ParameterKind, ParameterState, Quat, UpdateMode, Vec3};

/// Changed components of a 3-vector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVec3 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl PartialVec3 {
    /// Components of `value` that differ from `base`, or `None` if all match.
    pub fn diff(base: Vec3, value: Vec3) -> Option<Self> {
        if base == value {
            return None;
        }
        let pick = |i: usize| (base[i] != value[i]).then_some(value[i]);
        Some(Self {
            x: pick(0),
            y: pick(1),
            z: pick(2),
        })
    }

    pub fn apply(&self, target: &mut Vec3) {
        for (slot, v) in target.iter_mut().zip([self.x, self.y, self.z]) {
            if let Some(v) = v {
                *slot = v;
            }
        }
    }

    fn round(&mut self, rounder: &FloatRounder) {
        for v in [&mut self.x, &mut self.y, &mut self.z].into_iter().flatten() {
            *v = rounder.round(*v);
        }
    }
}

/// Changed components of a quaternion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialQuat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f32>,
}

impl PartialQuat {
    pub fn diff(base: Quat, value: Quat) -> Option<Self> {
        if base == value {
            return None;
        }
        let pick = |i: usize| (base[i] != value[i]).then_some(value[i]);
        Some(Self {
            x: pick(0),
            y: pick(1),
            z: pick(2),
            w: pick(3),
        })
    }

    pub fn apply(&self, target: &mut Quat) {
        for (slot, v) in target.iter_mut().zip([self.x, self.y, self.z, self.w]) {
            if let Some(v) = v {
                *slot = v;
            }
        }
    }

    fn round(&mut self, rounder: &FloatRounder) {
        for v in [&mut self.x, &mut self.y, &mut self.z, &mut self.w]
            .into_iter()
            .flatten()
        {
            *v = rounder.round(*v);
        }
    }
}

mod update_mode_code {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::snapshot::UpdateMode;

    pub fn serialize<S: Serializer>(mode: &Option<UpdateMode>, s: S) -> Result<S::Ok, S::Error> {
        match mode {
            Some(m) => s.serialize_some(&m.code()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UpdateMode>, D::Error> {
        let code: Option<i32> = Option::deserialize(d)?;
        code.map(|c| {
            UpdateMode::from_code(c)
                .ok_or_else(|| D::Error::custom(format!("unknown update mode code {c}")))
        })
        .transpose()
    }
}

/// One sparse snapshot delta.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDelta {
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub time_scale: Option<f32>,
    #[serde(rename = "pos", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PartialVec3>,
    #[serde(rename = "rot", default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<PartialQuat>,
    #[serde(rename = "scl", default, skip_serializing_if = "Option::is_none")]
    pub local_scale: Option<PartialVec3>,
    #[serde(rename = "spd", default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(
        rename = "um",
        default,
        skip_serializing_if = "Option::is_none",
        with = "update_mode_code"
    )]
    pub update_mode: Option<UpdateMode>,
    #[serde(rename = "lyrs", default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerState>>,
    #[serde(rename = "prms", default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterState>>,
}

impl SnapshotDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Round every float carried by this delta.
    pub fn round(&mut self, rounder: &FloatRounder) {
        for v in [&mut self.time_scale, &mut self.speed].into_iter().flatten() {
            *v = rounder.round(*v);
        }
        if let Some(p) = self.position.as_mut() {
            p.round(rounder);
        }
        if let Some(r) = self.rotation.as_mut() {
            r.round(rounder);
        }
        if let Some(s) = self.local_scale.as_mut() {
            s.round(rounder);
        }
        for layer in self.layers.iter_mut().flatten() {
            layer.normalized_time = rounder.round(layer.normalized_time);
            layer.capture_time = rounder.round(layer.capture_time);
        }
        for parameter in self.parameters.iter_mut().flatten() {
            parameter.float_value = rounder.round(parameter.float_value);
        }
    }
}

impl Serialize for LayerState {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let with_capture = self.capture_time != 0.0;
        let mut seq = s.serialize_seq(Some(if with_capture { 4 } else { 3 }))?;
        seq.serialize_element(&self.layer_index)?;
        seq.serialize_element(&self.state_hash)?;
        seq.serialize_element(&self.normalized_time)?;
        if with_capture {
            seq.serialize_element(&self.capture_time)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for LayerState {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct LayerVisitor;

        impl<'de> Visitor<'de> for LayerVisitor {
            type Value = LayerState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("[layerIndex, stateHash, normalizedTime, captureTime?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LayerState, A::Error> {
                let layer_index = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let state_hash = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let normalized_time = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let capture_time = seq.next_element()?.unwrap_or(0.0);
                Ok(LayerState {
                    layer_index,
                    state_hash,
                    normalized_time,
                    capture_time,
                })
            }
        }

        d.deserialize_seq(LayerVisitor)
    }
}

impl Serialize for ParameterState {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(3))?;
        seq.serialize_element(&self.id)?;
        seq.serialize_element(&self.kind.code())?;
        match self.kind {
            ParameterKind::Float => seq.serialize_element(&self.float_value)?,
            ParameterKind::Int => seq.serialize_element(&self.int_value)?,
            ParameterKind::Bool | ParameterKind::Trigger => {
                seq.serialize_element(&self.bool_value)?
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ParameterState {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct ParameterVisitor;

        impl<'de> Visitor<'de> for ParameterVisitor {
            type Value = ParameterState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("[id, typeCode, value]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ParameterState, A::Error> {
                let id: i32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let code: i32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let kind =
                    ParameterKind::from_code(code).map_err(<A::Error as de::Error>::custom)?;
                let missing = || <A::Error as de::Error>::invalid_length(2, &ParameterVisitor);
                let parameter = match kind {
                    ParameterKind::Float => {
                        ParameterState::float(id, seq.next_element()?.ok_or_else(missing)?)
                    }
                    ParameterKind::Int => {
                        ParameterState::int(id, seq.next_element()?.ok_or_else(missing)?)
                    }
                    ParameterKind::Bool => {
                        ParameterState::boolean(id, seq.next_element()?.ok_or_else(missing)?)
                    }
                    ParameterKind::Trigger => {
                        ParameterState::trigger(id, seq.next_element()?.ok_or_else(missing)?)
                    }
                };
                Ok(parameter)
            }
        }

        d.deserialize_seq(ParameterVisitor)
    }
}
