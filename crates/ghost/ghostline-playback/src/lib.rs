//! ghostline-playback: apply recorded ghost timelines to live actors.
//!
//! The host implements [`Actor`] (and optionally [`AnimationController`]) for its
//! scene objects, loads recorded streams through a [`BlockLoader`], binds one actor
//! per timeline and then drives [`GhostManager::tick`] from its frame loop, or
//! awaits [`GhostManager::run_sweep`].
//!
//! Recording goes the other way: a [`SnapshotSource`] is sampled by a [`Recorder`]
//! and the finished stream is handed to a [`Saver`].

pub mod actor;
pub mod capture;
pub mod config;
pub mod error;
pub mod io;
pub mod manager;
pub mod recorder;
pub mod restore;
pub mod scheduler;
pub mod transforms;

pub use actor::{Actor, AnimationController, ClipInfo};
pub use capture::{capture, RawParameter, SnapshotSource};
pub use config::Config;
pub use error::PlaybackError;
#[cfg(feature = "lz4")]
pub use io::Lz4Compressor;
pub use io::{
    BlockLoader, BlockStream, Compressor, DirectoryLoader, FileSaver, MemoryLoader, MemorySaver,
    Saver,
};
pub use manager::{GhostManager, LoadReport};
pub use recorder::Recorder;
pub use restore::{corrected_normalized_time, restore};
pub use scheduler::{BatchScheduler, SweepState};
pub use transforms::{sample_transforms, TransformSample};

pub type Result<T> = std::result::Result<T, PlaybackError>;
