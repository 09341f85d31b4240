//! Bonuses, bonus lists, and query selectors.
//!
//! - `Bonus`: one tagged, valued, time-limited modifier.
//! - `BonusList`: insertion-ordered shared references with set-algebra
//!   helpers and the tree-linkage hook into the generation counter.
//! - `Selector`: the predicate algebra queries are phrased in.

mod bonus;
mod list;
mod selector;

pub use bonus::{Bonus, SharedBonus};
pub use list::{BonusList, EpochHandle};
pub use selector::Selector;
