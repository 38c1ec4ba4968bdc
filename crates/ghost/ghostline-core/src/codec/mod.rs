//! Baseline-diff codec.
//!
//! An encoder and its matching decoder each hold a *baseline* snapshot. Every
//! encoded record carries only what differs from the encoder's baseline, after
//! which the baseline becomes the encoded snapshot. Decoding the same record
//! sequence in order against a fresh decoder rebuilds the same snapshots.
//!
//! Layers and parameters are diffed by key presence only: an entry whose key
//! already exists in the baseline is never re-sent, even when its value moved.

pub mod delta;

use hashbrown::HashSet;

use crate::config::CodecConfig;
use crate::error::GhostError;
use crate::rounding::FloatRounder;
use crate::snapshot::{LayerState, ParameterKey, ParameterState, Snapshot};

pub use delta::{PartialQuat, PartialVec3, SnapshotDelta};

/// Stateful encoder/decoder for one snapshot stream.
#[derive(Clone, Debug, Default)]
pub struct DeltaCodec {
    baseline: Snapshot,
    rounder: Option<FloatRounder>,
}

fn layer_union(base: &[LayerState], incoming: &[LayerState]) -> Vec<LayerState> {
    let mut seen: HashSet<i32> = base.iter().map(|l| l.layer_index).collect();
    let mut out = base.to_vec();
    out.extend(incoming.iter().filter(|l| seen.insert(l.layer_index)).copied());
    out
}

fn parameter_union(base: &[ParameterState], incoming: &[ParameterState]) -> Vec<ParameterState> {
    let mut seen: HashSet<ParameterKey> = base.iter().map(ParameterState::key).collect();
    let mut out = base.to_vec();
    out.extend(incoming.iter().filter(|p| seen.insert(p.key())).copied());
    out
}

impl DeltaCodec {
    /// Codec with the canonical default baseline and no rounding.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodecConfig) -> Result<Self, GhostError> {
        config.validate()?;
        Ok(Self {
            baseline: Snapshot::default(),
            rounder: config.rounding,
        })
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Return to the canonical default baseline.
    pub fn reset(&mut self) {
        self.baseline = Snapshot::default();
    }

    /// Apply the configured rounding to a record timestamp.
    pub fn round_time(&self, time: f32) -> f32 {
        self.rounder.map_or(time, |r| r.round(time))
    }

    /// Whether encoding `snapshot` would carry any information.
    pub fn will_emit(&self, snapshot: &Snapshot) -> bool {
        *snapshot != self.baseline
    }

    /// Diff `snapshot` against the baseline, then adopt it as the new baseline.
    pub fn encode(&mut self, snapshot: &Snapshot) -> SnapshotDelta {
        let base = &self.baseline;

        let layers = {
            let known: HashSet<i32> = base.layers.iter().map(|l| l.layer_index).collect();
            let fresh: Vec<LayerState> = snapshot
                .layers
                .iter()
                .filter(|l| !known.contains(&l.layer_index))
                .copied()
                .collect();
            (!fresh.is_empty()).then_some(fresh)
        };

        let parameters = {
            let known: HashSet<ParameterKey> =
                base.parameters.iter().map(ParameterState::key).collect();
            let fresh: Vec<ParameterState> = snapshot
                .parameters
                .iter()
                .filter(|p| !known.contains(&p.key()))
                .copied()
                .collect();
            (!fresh.is_empty()).then_some(fresh)
        };

        let mut delta = SnapshotDelta {
            time_scale: (snapshot.time_scale != base.time_scale).then_some(snapshot.time_scale),
            position: PartialVec3::diff(base.position, snapshot.position),
            rotation: PartialQuat::diff(base.rotation, snapshot.rotation),
            local_scale: PartialVec3::diff(base.local_scale, snapshot.local_scale),
            speed: (snapshot.speed != base.speed).then_some(snapshot.speed),
            update_mode: (snapshot.update_mode != base.update_mode)
                .then_some(snapshot.update_mode),
            layers,
            parameters,
        };
        if let Some(rounder) = &self.rounder {
            delta.round(rounder);
        }

        self.baseline = snapshot.clone();
        delta
    }

    /// Apply `delta` over the baseline, adopt the result as the new baseline and return it.
    ///
    /// On a key collision between baseline and delta entries, the baseline entry is kept.
    pub fn decode(&mut self, delta: &SnapshotDelta) -> Snapshot {
        let mut delta = delta.clone();
        if let Some(rounder) = &self.rounder {
            delta.round(rounder);
        }

        let mut next = self.baseline.clone();
        if let Some(v) = delta.time_scale {
            next.time_scale = v;
        }
        if let Some(p) = &delta.position {
            p.apply(&mut next.position);
        }
        if let Some(r) = &delta.rotation {
            r.apply(&mut next.rotation);
        }
        if let Some(s) = &delta.local_scale {
            s.apply(&mut next.local_scale);
        }
        if let Some(v) = delta.speed {
            next.speed = v;
        }
        if let Some(m) = delta.update_mode {
            next.update_mode = m;
        }
        if let Some(layers) = &delta.layers {
            next.layers = layer_union(&self.baseline.layers, layers);
        }
        if let Some(parameters) = &delta.parameters {
            next.parameters = parameter_union(&self.baseline.parameters, parameters);
        }

        self.baseline = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{LayerState, ParameterState};

    #[test]
    fn default_snapshot_encodes_to_empty_delta() {
        let mut codec = DeltaCodec::new();
        assert!(!codec.will_emit(&Snapshot::default()));
        assert!(codec.encode(&Snapshot::default()).is_empty());
    }

    #[test]
    fn baseline_advances_after_encode() {
        let mut codec = DeltaCodec::new();
        let mut s = Snapshot::default();
        s.position = [1.0, 0.0, 0.0];
        codec.encode(&s);
        assert_eq!(codec.baseline(), &s);
        codec.reset();
        assert_eq!(codec.baseline(), &Snapshot::default());
    }

    #[test]
    fn decode_keeps_baseline_entry_on_collision() {
        let mut decoder = DeltaCodec::new();
        decoder.decode(&SnapshotDelta {
            layers: Some(vec![LayerState::new(0, 11, 0.1)]),
            parameters: Some(vec![ParameterState::float(1, 0.5)]),
            ..SnapshotDelta::default()
        });
        let out = decoder.decode(&SnapshotDelta {
            layers: Some(vec![LayerState::new(0, 99, 0.9), LayerState::new(1, 22, 0.2)]),
            parameters: Some(vec![ParameterState::float(1, 7.0)]),
            ..SnapshotDelta::default()
        });
        assert_eq!(out.layers, vec![LayerState::new(0, 11, 0.1), LayerState::new(1, 22, 0.2)]);
        assert_eq!(out.parameters, vec![ParameterState::float(1, 0.5)]);
    }

    #[test]
    fn rounding_applies_to_emitted_floats() {
        let mut codec =
            DeltaCodec::with_config(&CodecConfig::recording()).expect("valid config");
        let mut s = Snapshot::default();
        s.speed = 1.234_567_89;
        let delta = codec.encode(&s);
        assert_eq!(delta.speed, Some(1.234_568));
    }
}
