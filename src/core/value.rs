//! Value-combination kinds.
//!
//! Each bonus declares how its numeric value folds into an aggregate.
//! The fold order is load-bearing and implemented by
//! `BonusList::total_value`; see that method for the exact sequence.

use serde::{Deserialize, Serialize};

/// How a bonus value combines with others of the same query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Plain additive term.
    #[default]
    Additive,
    /// Replaces the base term; the last base encountered wins.
    Base,
    /// Percentage applied to the running total after base and additive terms.
    PercentToAll,
    /// Percentage applied to the original base term only.
    PercentToBase,
    /// Only the maximum among these values contributes, once, additively.
    IndependentMax,
    /// Only the minimum among these values contributes, once, additively.
    IndependentMin,
}
