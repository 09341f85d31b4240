//! On-demand value computation.
//!
//! A calculator overrides a bonus's stored value with one derived from the
//! observing node's state. Calculators are pure: the same (bonus, profile)
//! pair always yields the same value.

use serde::{Deserialize, Serialize};

use crate::bonus::Bonus;
use crate::graph::NodeProfile;

/// Recomputes a bonus value for a specific query context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Calculator {
    /// Ignore the stored value and use this one.
    Fixed(i64),
    /// `base + per_rank * rank` of the observing node; falls back to the
    /// stored value when the node has no rank.
    RankScaled { base: i64, per_rank: i64 },
}

impl Calculator {
    /// Compute the effective value of `bonus` as seen from `profile`.
    #[must_use]
    pub fn value(&self, bonus: &Bonus, profile: &NodeProfile) -> i64 {
        match self {
            Self::Fixed(val) => *val,
            Self::RankScaled { base, per_rank } => match profile.rank {
                Some(rank) => base + per_rank * i64::from(rank),
                None => bonus.val.get(),
            },
        }
    }
}
