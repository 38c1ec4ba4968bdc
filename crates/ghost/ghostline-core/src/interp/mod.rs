//! Snapshot interpolation algebra.
//!
//! Each snapshot field has one blend rule, looked up through [`field_blend`]:
//! geometry and scalars blend continuously, rotation blends spherically, and
//! discrete state (update mode, layer clip state) snaps at `t = 0.5`.
//! Parameters are mixed: id/kind/bool come from the selected side while the
//! float and int values blend arithmetically.

pub mod functions;

use crate::error::GhostError;
use crate::snapshot::{LayerState, ParameterState, Snapshot};
use functions::{lerp_f32, lerp_vec3, slerp_quat, step};

/// Fields of a [`Snapshot`] that carry their own blend rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotField {
    TimeScale,
    Position,
    Rotation,
    LocalScale,
    Speed,
    UpdateMode,
    Layers,
    ParameterValues,
    ParameterIdentity,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 9] = [
        SnapshotField::TimeScale,
        SnapshotField::Position,
        SnapshotField::Rotation,
        SnapshotField::LocalScale,
        SnapshotField::Speed,
        SnapshotField::UpdateMode,
        SnapshotField::Layers,
        SnapshotField::ParameterValues,
        SnapshotField::ParameterIdentity,
    ];
}

/// How a field moves between two snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldBlend {
    /// Component-wise linear interpolation.
    Linear,
    /// Shortest-arc quaternion slerp.
    Spherical,
    /// Pick the left side for `t < 0.5`, else the right side.
    Step,
}

pub const fn field_blend(field: SnapshotField) -> FieldBlend {
    match field {
        SnapshotField::TimeScale
        | SnapshotField::Position
        | SnapshotField::LocalScale
        | SnapshotField::Speed
        | SnapshotField::ParameterValues => FieldBlend::Linear,
        SnapshotField::Rotation => FieldBlend::Spherical,
        SnapshotField::UpdateMode | SnapshotField::Layers | SnapshotField::ParameterIdentity => {
            FieldBlend::Step
        }
    }
}

#[inline]
fn blend_scalar(field: SnapshotField, a: f32, b: f32, t: f32) -> f32 {
    match field_blend(field) {
        FieldBlend::Step => step(a, b, t),
        FieldBlend::Linear | FieldBlend::Spherical => lerp_f32(a, b, t),
    }
}

#[inline]
fn blend_vec3(field: SnapshotField, a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    match field_blend(field) {
        FieldBlend::Step => step(a, b, t),
        FieldBlend::Linear | FieldBlend::Spherical => lerp_vec3(a, b, t),
    }
}

/// Layer clip state cannot be blended: one side wins.
#[inline]
pub fn lerp_layer(a: &LayerState, b: &LayerState, t: f32) -> LayerState {
    *step(a, b, t)
}

/// Blend two parameters at the same position.
///
/// Identity (id, kind) and the bool value come from the selected side; float
/// and int values are interpolated, the int rounded to the nearest integer.
pub fn lerp_parameter(a: &ParameterState, b: &ParameterState, t: f32) -> ParameterState {
    let selected = step(a, b, t);
    let value_blend = field_blend(SnapshotField::ParameterValues);
    let (float_value, int_value) = match value_blend {
        FieldBlend::Step => (selected.float_value, selected.int_value),
        FieldBlend::Linear | FieldBlend::Spherical => (
            lerp_f32(a.float_value, b.float_value, t),
            lerp_f32(a.int_value as f32, b.int_value as f32, t).round() as i32,
        ),
    };
    ParameterState {
        id: selected.id,
        kind: selected.kind,
        float_value,
        int_value,
        bool_value: selected.bool_value,
    }
}

/// Blend element-wise, then keep the selected side's tail past the shorter list.
fn blend_list<T: Copy>(a: &[T], b: &[T], t: f32, blend: impl Fn(&T, &T) -> T) -> Vec<T> {
    let len = step(a.len(), b.len(), t);
    let mut out = Vec::with_capacity(len);
    for idx in 0..len {
        match (a.get(idx), b.get(idx)) {
            (Some(va), Some(vb)) => out.push(blend(va, vb)),
            (Some(va), None) => out.push(*va),
            (None, Some(vb)) => out.push(*vb),
            (None, None) => {}
        }
    }
    out
}

/// Interpolate two snapshots of the same actor.
///
/// Precondition: `a` and `b` have the same layer and parameter layout. When they
/// do not, matching positions are still blended and the remaining entries are
/// taken from the selected side; use [`try_lerp`] to reject such inputs.
pub fn lerp(a: &Snapshot, b: &Snapshot, t: f32) -> Snapshot {
    Snapshot {
        time_scale: blend_scalar(SnapshotField::TimeScale, a.time_scale, b.time_scale, t),
        position: blend_vec3(SnapshotField::Position, a.position, b.position, t),
        rotation: match field_blend(SnapshotField::Rotation) {
            FieldBlend::Step => step(a.rotation, b.rotation, t),
            FieldBlend::Linear | FieldBlend::Spherical => slerp_quat(a.rotation, b.rotation, t),
        },
        local_scale: blend_vec3(SnapshotField::LocalScale, a.local_scale, b.local_scale, t),
        speed: blend_scalar(SnapshotField::Speed, a.speed, b.speed, t),
        update_mode: step(a.update_mode, b.update_mode, t),
        layers: blend_list(&a.layers, &b.layers, t, |la, lb| lerp_layer(la, lb, t)),
        parameters: blend_list(&a.parameters, &b.parameters, t, |pa, pb| {
            lerp_parameter(pa, pb, t)
        }),
    }
}

/// [`lerp`] that rejects snapshots with different layer or parameter counts.
pub fn try_lerp(a: &Snapshot, b: &Snapshot, t: f32) -> Result<Snapshot, GhostError> {
    if a.layers.len() != b.layers.len() {
        return Err(GhostError::IncompatibleSnapshots {
            field: "layers",
            left: a.layers.len(),
            right: b.layers.len(),
        });
    }
    if a.parameters.len() != b.parameters.len() {
        return Err(GhostError::IncompatibleSnapshots {
            field: "parameters",
            left: a.parameters.len(),
            right: b.parameters.len(),
        });
    }
    Ok(lerp(a, b, t))
}
