//! Error types for ghostline-core.

/// Errors raised while building, blending or (de)serializing snapshots.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GhostError {
    /// Two snapshots that do not belong to the same actor were blended.
    #[error("Incompatible snapshots: {field} count {left} vs {right}")]
    IncompatibleSnapshots {
        field: &'static str,
        left: usize,
        right: usize,
    },

    /// A delta record is missing positional fields or carries wrong types.
    #[error("Malformed delta record: {reason}")]
    MalformedRecord { reason: String },

    /// The host reported a parameter type this crate cannot represent.
    #[error("Unhandled parameter type code {code}")]
    UnhandledParameterType { code: i32 },

    /// Encoding a record failed.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GhostError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Short label used in log lines.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::IncompatibleSnapshots { .. } => "interpolation",
            Self::MalformedRecord { .. } => "decode",
            Self::UnhandledParameterType { .. } => "capture",
            Self::Serialization { .. } => "encode",
            Self::InvalidConfig { .. } => "config",
        }
    }

    /// Map a serde_json failure raised while reading a stream.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        Self::MalformedRecord {
            reason: err.to_string(),
        }
    }

    /// Map a serde_json failure raised while writing a stream.
    pub(crate) fn from_encode(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
