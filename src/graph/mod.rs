//! The propagation graph.
//!
//! - `BonusGraph`: arena owning all nodes plus the generation counter;
//!   every edit and query goes through it.
//! - `BonusNode`: one vertex with local/exported bonus lists, edges, and
//!   a per-node query cache.
//! - `NodeProfile`: the game-facing attributes limiters decide against.

mod graph;
mod node;
mod profile;

pub use graph::BonusGraph;
pub use node::{BonusNode, QueryKey};
pub use profile::NodeProfile;
