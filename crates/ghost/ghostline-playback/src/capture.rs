//! Build snapshots from live host state.

use ghostline_core::{
    GhostError, LayerState, ParameterKind, ParameterState, Quat, Snapshot, UpdateMode, Vec3,
};

/// A controller parameter as the host reports it, before type checking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawParameter {
    pub id: i32,
    /// Host type code (Float = 1, Int = 3, Bool = 4, Trigger = 9).
    pub type_code: i32,
    pub float_value: f32,
    pub int_value: i32,
    pub bool_value: bool,
    /// Driven by an animation curve; such parameters are not recorded.
    pub curve_controlled: bool,
}

/// Read side of a live actor.
pub trait SnapshotSource {
    /// `(position, rotation, scale)`
    fn transform(&self) -> (Vec3, Quat, Vec3);

    fn time_scale(&self) -> f32 {
        1.0
    }

    fn speed(&self) -> f32 {
        1.0
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Normal
    }

    /// `(state_hash, normalized_time)` per layer, indexed by layer.
    fn layers(&self) -> Vec<(i32, f32)> {
        Vec::new()
    }

    fn parameters(&self) -> Vec<RawParameter> {
        Vec::new()
    }
}

fn convert_parameter(raw: &RawParameter) -> Result<ParameterState, GhostError> {
    let kind = ParameterKind::from_code(raw.type_code)?;
    Ok(match kind {
        ParameterKind::Float => ParameterState::float(raw.id, raw.float_value),
        ParameterKind::Int => ParameterState::int(raw.id, raw.int_value),
        ParameterKind::Bool => ParameterState::boolean(raw.id, raw.bool_value),
        ParameterKind::Trigger => ParameterState::trigger(raw.id, raw.bool_value),
    })
}

/// Snapshot of `source` at `time`. Layers are stamped with `time` as capture time.
///
/// Fails on a parameter type the snapshot model cannot hold.
pub fn capture<S: SnapshotSource + ?Sized>(source: &S, time: f32) -> Result<Snapshot, GhostError> {
    let (position, rotation, local_scale) = source.transform();
    let layers = source
        .layers()
        .into_iter()
        .enumerate()
        .map(|(index, (state_hash, normalized_time))| {
            LayerState::new(index as i32, state_hash, normalized_time).captured_at(time)
        })
        .collect();
    let parameters = source
        .parameters()
        .iter()
        .filter(|p| !p.curve_controlled)
        .map(convert_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Snapshot {
        time_scale: source.time_scale(),
        position,
        rotation,
        local_scale,
        speed: source.speed(),
        update_mode: source.update_mode(),
        layers,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        params: Vec<RawParameter>,
    }

    impl SnapshotSource for Fixed {
        fn transform(&self) -> (Vec3, Quat, Vec3) {
            ([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0])
        }

        fn layers(&self) -> Vec<(i32, f32)> {
            vec![(55, 0.4)]
        }

        fn parameters(&self) -> Vec<RawParameter> {
            self.params.clone()
        }
    }

    fn raw(id: i32, type_code: i32, curve_controlled: bool) -> RawParameter {
        RawParameter {
            id,
            type_code,
            float_value: 0.5,
            int_value: 2,
            bool_value: true,
            curve_controlled,
        }
    }

    #[test]
    fn skips_curve_controlled_parameters() {
        let source = Fixed {
            params: vec![raw(1, 1, false), raw(2, 1, true), raw(3, 9, false)],
        };
        let s = capture(&source, 4.0).unwrap();
        assert_eq!(
            s.parameters,
            vec![ParameterState::float(1, 0.5), ParameterState::trigger(3, true)]
        );
        assert_eq!(s.layers, vec![LayerState::new(0, 55, 0.4).captured_at(4.0)]);
        assert_eq!(s.position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn unknown_type_code_is_fatal() {
        let source = Fixed {
            params: vec![raw(1, 2, false)],
        };
        assert_eq!(
            capture(&source, 0.0),
            Err(GhostError::UnhandledParameterType { code: 2 })
        );
    }
}
