//! Persisted delta stream: a JSON array of `{"t": time, "d": delta}` records.
//!
//! Records are only meaningful in order: each `d` is relative to the snapshot
//! rebuilt from all records before it.

use serde::{Deserialize, Serialize};

use crate::codec::{DeltaCodec, SnapshotDelta};
use crate::config::CodecConfig;
use crate::error::GhostError;
use crate::snapshot::Snapshot;
use crate::timeline::Timeline;

/// One timestamped delta.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecord {
    #[serde(rename = "t")]
    pub time: f32,
    #[serde(rename = "d")]
    pub delta: SnapshotDelta,
}

/// Capture-side accumulator turning a snapshot sequence into delta records.
#[derive(Debug)]
pub struct StreamWriter {
    codec: DeltaCodec,
    records: Vec<DeltaRecord>,
}

impl StreamWriter {
    pub fn new(config: &CodecConfig) -> Result<Self, GhostError> {
        Ok(Self {
            codec: DeltaCodec::with_config(config)?,
            records: Vec::new(),
        })
    }

    /// Append a record for `snapshot` if it differs from the previous one.
    /// The first push always records. Returns whether a record was written.
    ///
    /// A snapshot whose only changes are layer or parameter values under keys
    /// the baseline already holds encodes to an empty delta; that record is
    /// dropped once the baseline has advanced.
    pub fn push(&mut self, time: f32, snapshot: &Snapshot) -> bool {
        let first = self.records.is_empty();
        if !first && !self.codec.will_emit(snapshot) {
            return false;
        }
        let delta = self.codec.encode(snapshot);
        if !first && delta.is_empty() {
            return false;
        }
        let time = self.codec.round_time(time);
        self.records.push(DeltaRecord { time, delta });
        true
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[DeltaRecord] {
        &self.records
    }

    /// Serialize all records. The writer is consumed.
    pub fn finish(self) -> Result<Vec<u8>, GhostError> {
        serde_json::to_vec(&self.records).map_err(GhostError::from_encode)
    }
}

/// Replay `records` in order through a fresh codec and collect the rebuilt snapshots.
pub fn decode_records(
    records: &[DeltaRecord],
    config: &CodecConfig,
) -> Result<Timeline, GhostError> {
    let mut codec = DeltaCodec::with_config(config)?;
    let samples: Vec<(f32, Snapshot)> = records
        .iter()
        .map(|r| (codec.round_time(r.time), codec.decode(&r.delta)))
        .collect();
    Ok(Timeline::from_samples(samples))
}

/// Parse a serialized stream into a [`Timeline`] at full precision.
pub fn decode_stream(bytes: &[u8]) -> Result<Timeline, GhostError> {
    decode_stream_with(bytes, &CodecConfig::default())
}

pub fn decode_stream_with(bytes: &[u8], config: &CodecConfig) -> Result<Timeline, GhostError> {
    let records: Vec<DeltaRecord> =
        serde_json::from_slice(bytes).map_err(GhostError::from_decode)?;
    log::debug!("decode_stream: {} records", records.len());
    decode_records(&records, config)
}

/// Serialize a [`Timeline`] back into a delta stream.
pub fn encode_timeline(
    timeline: &Timeline,
    config: &CodecConfig,
) -> Result<Vec<u8>, GhostError> {
    let mut writer = StreamWriter::new(config)?;
    for (time, snapshot) in timeline.iter() {
        writer.push(time, snapshot);
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::LayerState;

    #[test]
    fn first_push_always_records() {
        let mut w = StreamWriter::new(&CodecConfig::default()).unwrap();
        assert!(w.push(0.0, &Snapshot::default()));
        assert!(!w.push(0.1, &Snapshot::default()));
        assert_eq!(w.record_count(), 1);
        let bytes = w.finish().unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), r#"[{"t":0.0,"d":{}}]"#);
    }

    #[test]
    fn advancing_layer_time_writes_no_empty_records() {
        let mut w = StreamWriter::new(&CodecConfig::default()).unwrap();
        for i in 0..10 {
            let t = i as f32 * 0.1;
            let snapshot = Snapshot {
                layers: vec![LayerState::new(0, 7, t).captured_at(t)],
                ..Snapshot::default()
            };
            w.push(t, &snapshot);
        }
        assert_eq!(w.record_count(), 1);
        assert!(w.records().iter().skip(1).all(|r| !r.delta.is_empty()));

        let moved = Snapshot {
            position: [1.0, 0.0, 0.0],
            layers: vec![LayerState::new(0, 7, 0.95)],
            ..Snapshot::default()
        };
        assert!(w.push(1.0, &moved));
        assert_eq!(w.record_count(), 2);
    }

    #[test]
    fn recording_config_rounds_times() {
        let mut w = StreamWriter::new(&CodecConfig::recording()).unwrap();
        let time = 0.1f32 * 9.0;
        w.push(time, &Snapshot::default());
        assert_eq!(w.records()[0].time, 0.9);
        let bytes = w.finish().unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().starts_with(r#"[{"t":0.9,"#));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = decode_stream(b"{not json").unwrap_err();
        assert_eq!(err.category(), "decode");
    }
}
