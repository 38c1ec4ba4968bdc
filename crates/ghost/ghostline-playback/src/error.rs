//! Error types for ghostline-playback.

use ghostline_core::GhostError;

/// Errors raised while loading, binding, replaying or saving ghosts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Snapshot, codec or stream failure.
    #[error(transparent)]
    Ghost(#[from] GhostError),

    /// A loader could not produce a byte block.
    #[error("Load failed: {reason}")]
    Load { reason: String },

    /// A saver could not persist a stream.
    #[error("Save failed: {reason}")]
    Save { reason: String },

    /// Compressing or decompressing a block failed.
    #[error("Compression error: {reason}")]
    Compression { reason: String },

    /// Actors handed to `bind` do not line up with the loaded timelines.
    #[error("Actor count mismatch: {timelines} timelines, {actors} actors")]
    ActorCountMismatch { timelines: usize, actors: usize },
}

impl PlaybackError {
    pub fn load(reason: impl Into<String>) -> Self {
        Self::Load {
            reason: reason.into(),
        }
    }

    pub fn save(reason: impl Into<String>) -> Self {
        Self::Save {
            reason: reason.into(),
        }
    }

    pub fn compression(reason: impl Into<String>) -> Self {
        Self::Compression {
            reason: reason.into(),
        }
    }

    /// Short label used in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Ghost(inner) => inner.category(),
            Self::Load { .. } => "load",
            Self::Save { .. } => "save",
            Self::Compression { .. } => "compression",
            Self::ActorCountMismatch { .. } => "binding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_core_errors() {
        let err: PlaybackError = GhostError::malformed("short layer").into();
        assert_eq!(err.category(), "decode");
        assert!(err.to_string().contains("short layer"));
    }

    #[test]
    fn mismatch_message() {
        let err = PlaybackError::ActorCountMismatch {
            timelines: 3,
            actors: 2,
        };
        assert_eq!(err.to_string(), "Actor count mismatch: 3 timelines, 2 actors");
    }
}
