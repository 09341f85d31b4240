//! Core tag types: kinds, subtypes, sources, durations, value kinds,
//! node handles, and engine configuration.
//!
//! Everything here is opaque data. Games assign meaning to the tags;
//! the engine only stores and compares them.

pub mod config;
pub mod duration;
pub mod tags;
pub mod value;

pub use config::{GraphConfig, DEFAULT_DEFER_ITERATION_CAP};
pub use duration::DurationSet;
pub use tags::{
    Alignment, BonusKind, BonusSource, CreatureId, FactionId, NodeId, NodeKind, PlayerId, SourceId,
    SourceKind, Subtype, TerrainId,
};
pub use value::ValueKind;
