//! Tag newtypes for bonus classification.
//!
//! The engine treats every game-specific meaning as an opaque tag:
//! a bonus *kind* says what the bonus modifies, a *subtype* disambiguates
//! the kind, and a *source* records provenance. Consumers assign meaning
//! to the numeric values; the engine only compares them.
//!
//! ## Wildcards
//!
//! Two sentinels participate in matching:
//! - `Subtype::ANY` (-1) matches any subtype, on either side of a query.
//! - `SourceId::ANY` matches any source id in provenance queries.

use serde::{Deserialize, Serialize};

/// Opaque tag identifying what a bonus modifies.
///
/// Games enumerate their own kinds (attack, morale, speed, ...) and
/// register symbolic names via `TagRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BonusKind(pub u16);

impl BonusKind {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw tag value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for BonusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

/// Disambiguates a bonus kind. `Subtype::ANY` is the wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subtype(pub i32);

impl Subtype {
    /// Wildcard subtype: matches any subtype in queries.
    pub const ANY: Self = Self(-1);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn is_any(self) -> bool {
        self.0 == Self::ANY.0
    }

    /// Wildcard-aware comparison: `ANY` on either side matches.
    #[must_use]
    pub const fn matches(self, other: Self) -> bool {
        self.is_any() || other.is_any() || self.0 == other.0
    }
}

impl Default for Subtype {
    fn default() -> Self {
        Self::ANY
    }
}

/// What category of producer granted a bonus (artifact, terrain, spell, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceKind(pub u8);

impl SourceKind {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl Default for SourceKind {
    fn default() -> Self {
        Self(0)
    }
}

/// Identifies the concrete producer instance within a `SourceKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub u32);

impl SourceId {
    /// Sentinel that matches any source id in provenance queries.
    pub const ANY: Self = Self(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn is_any(self) -> bool {
        self.0 == Self::ANY.0
    }

    #[must_use]
    pub const fn matches(self, other: Self) -> bool {
        self.is_any() || other.is_any() || self.0 == other.0
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::ANY
    }
}

/// Provenance of a bonus: producer category plus concrete producer id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BonusSource {
    pub kind: SourceKind,
    pub id: SourceId,
}

impl BonusSource {
    #[must_use]
    pub const fn new(kind: SourceKind, id: SourceId) -> Self {
        Self { kind, id }
    }
}

/// Classifies a node in the propagation graph (hero, stack, town, ...).
///
/// Propagators target node kinds; the engine never interprets the value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKind(pub u8);

impl NodeKind {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

/// Unique handle for a node owned by a `BonusGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

// === Profile tags read by limiters ===

/// Creature type tag, used by the creature-type limiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Terrain tag, used by the native-terrain limiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainId(pub u8);

/// Faction tag, used by the faction limiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u8);

/// Owning-player tag, used by the owner limiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

/// Coarse creature alignment, used by the alignment limiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
    Neutral,
}
