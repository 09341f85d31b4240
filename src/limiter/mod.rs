//! Filtering of bonuses against candidate nodes.
//!
//! - `Limiter`: one pure filter (creature type, faction, rank range, ...).
//! - `LimiterChain`: ordered links; first Discard wins, Defer survives.
//! - `resolve_accepted`: bounded fixed point over deferred decisions.

mod limiter;
mod resolve;

pub use limiter::{Decision, LimitContext, Limiter, LimiterChain};
pub use resolve::resolve_accepted;
