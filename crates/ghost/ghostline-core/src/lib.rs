//! ghostline-core: record/replay primitives for "ghost" actors.
//!
//! - [`snapshot`]: what one actor looks like at one instant
//! - [`interp`]: per-field blend rules between two snapshots
//! - [`codec`]: baseline-diff encoding of snapshot sequences
//! - [`stream`]: the persisted record format
//! - [`timeline`]: time-indexed lookup with interpolation and warp snapping
//!
//! Engine-agnostic and synchronous; hosts supply actors and I/O.

pub mod codec;
pub mod config;
pub mod error;
pub mod interp;
pub mod rounding;
pub mod snapshot;
pub mod stream;
pub mod timeline;

pub use codec::{DeltaCodec, PartialQuat, PartialVec3, SnapshotDelta};
pub use config::CodecConfig;
pub use error::GhostError;
pub use interp::{field_blend, lerp, try_lerp, FieldBlend, SnapshotField};
pub use rounding::{FloatRounder, MidpointRounding};
pub use snapshot::{
    LayerState, ParameterKey, ParameterKind, ParameterState, ParameterValue, Quat, Snapshot,
    UpdateMode, Vec3, IDENTITY_ROTATION, ONE_VEC3, ZERO_VEC3,
};
pub use stream::{
    decode_records, decode_stream, decode_stream_with, encode_timeline, DeltaRecord, StreamWriter,
};
pub use timeline::Timeline;

pub type Result<T> = std::result::Result<T, GhostError>;
