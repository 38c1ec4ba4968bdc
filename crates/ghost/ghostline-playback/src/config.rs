//! Playback configuration.

use serde::{Deserialize, Serialize};

use ghostline_core::CodecConfig;

use crate::error::PlaybackError;

/// Knobs for a [`GhostManager`](crate::GhostManager).
///
/// JSON example:
/// ```json
/// { "update_batch_size": 256, "warp_distance": 5.0, "codec": { "rounding": null } }
/// ```
/// A `null` or missing `warp_distance` disables warp snapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Actors restored per scheduler tick. At least 1.
    pub update_batch_size: usize,
    /// Bracketing samples at least this far apart are snapped, not blended.
    #[serde(with = "warp_distance")]
    pub warp_distance: f32,
    /// Applied when decoding loaded streams.
    pub codec: CodecConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_batch_size: 1024,
            warp_distance: f32::INFINITY,
            codec: CodecConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), PlaybackError> {
        if self.update_batch_size == 0 {
            return Err(invalid("update_batch_size must be at least 1"));
        }
        if self.warp_distance.is_nan() || self.warp_distance < 0.0 {
            return Err(invalid(format!(
                "warp_distance must be non-negative, got {}",
                self.warp_distance
            )));
        }
        self.codec.validate()?;
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> PlaybackError {
    ghostline_core::GhostError::InvalidConfig {
        reason: reason.into(),
    }
    .into()
}

// JSON has no infinity; map it to null.
mod warp_distance {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, s: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            s.serialize_some(value)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(d)?.unwrap_or(f32::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.update_batch_size, 1024);
        assert!(cfg.warp_distance.is_infinite());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_roundtrip_keeps_infinite_warp() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"warp_distance\":null"));
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Config::default());

        let partial: Config = serde_json::from_str(r#"{"warp_distance": 2.5}"#).unwrap();
        assert_eq!(partial.warp_distance, 2.5);
        assert_eq!(partial.update_batch_size, 1024);
    }

    #[test]
    fn rejects_zero_batch() {
        let cfg = Config {
            update_batch_size: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
