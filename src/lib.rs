//! # bonus-graph
//!
//! An attribute/effect propagation engine for layered game stats.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded bonus kinds, node kinds, or source
//!    kinds. Games register their vocabularies at startup.
//!
//! 2. **Queries Over Copies**: Inheritance is computed at query time by
//!    walking ancestors; attaching a node never duplicates bonus objects.
//!
//! 3. **One Generation Counter**: Every structural mutation bumps a single
//!    epoch; caches compare against it instead of tracking fine-grained
//!    dependencies.
//!
//! ## Architecture
//!
//! - **Shared Bonuses**: `Rc<Bonus>` everywhere, so removal and duplicate
//!   elimination work by reference identity, not field equality.
//!
//! - **Structured Cache Keys**: A query is cached under its selector,
//!   limiter, and context root. Distinct queries can never collide.
//!
//! - **Bounded Fixed Point**: Interdependent limiters re-run until stable
//!   or an iteration cap; leftovers are discarded, never half-applied.
//!
//! ## Modules
//!
//! - `core`: Tag newtypes, duration flags, value kinds, configuration
//! - `bonus`: The `Bonus` record, ordered lists, and query selectors
//! - `limiter`: Per-bonus admission predicates and fixed-point resolution
//! - `policy`: Propagators (where a bonus travels) and calculators
//! - `graph`: The node graph, queries, caching, and time decay
//! - `registry`: Symbolic name registry for data-driven content

pub mod bonus;
pub mod core;
pub mod graph;
pub mod limiter;
pub mod policy;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    Alignment, BonusKind, BonusSource, CreatureId, DurationSet, FactionId, GraphConfig, NodeId,
    NodeKind, PlayerId, SourceId, SourceKind, Subtype, TerrainId, ValueKind,
    DEFAULT_DEFER_ITERATION_CAP,
};

pub use crate::bonus::{Bonus, BonusList, EpochHandle, Selector, SharedBonus};

pub use crate::limiter::{Decision, LimitContext, Limiter, LimiterChain};

pub use crate::policy::{Calculator, Propagator};

pub use crate::graph::{BonusGraph, BonusNode, NodeProfile, QueryKey};

pub use crate::registry::TagRegistry;
