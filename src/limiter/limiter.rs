//! Limiter chain: the per-bonus filter pipeline.
//!
//! A limiter decides whether a bonus applies in the context of a candidate
//! node. Decisions are three-valued: a filter can also *defer* when its
//! truth depends on which other bonuses end up accepted in the same pass
//! (resolved by `resolve_accepted`).
//!
//! Chains are immutable after construction and shared by reference between
//! bonuses. Evaluation order is link order: the first Discard wins, a Defer
//! survives to the end unless something later discards.

use serde::{Deserialize, Serialize};

use crate::bonus::{Bonus, BonusList};
use crate::core::{Alignment, BonusKind, CreatureId, FactionId, PlayerId, Subtype, TerrainId};
use crate::graph::NodeProfile;

/// Outcome of asking one limiter about one bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The bonus applies here.
    Accept,
    /// The bonus does not apply here; stop evaluating the chain.
    Discard,
    /// Cannot decide yet; depends on the already-accepted set.
    Defer,
}

/// Evaluation context handed to every limiter link.
pub struct LimitContext<'a> {
    /// The bonus being filtered.
    pub bonus: &'a Bonus,
    /// Profile of the node the query is evaluated against.
    /// `None` for contextless list filtering.
    pub profile: Option<&'a NodeProfile>,
    /// Bonuses already accepted in the current resolution pass.
    pub accepted: &'a BonusList,
}

/// A single filter. All variants are pure context-only decisions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limiter {
    /// Only nodes of the given creature type; optionally also its upgrades.
    CreatureType {
        creature: CreatureId,
        include_upgrades: bool,
    },
    /// Only nodes on which another bonus of the given kind (and optionally
    /// subtype) is already accepted. The canonical Defer user.
    HasAnotherBonus {
        kind: BonusKind,
        subtype: Option<Subtype>,
    },
    /// Only entities standing on their native terrain of this type.
    NativeTerrain(TerrainId),
    /// Only entities of the given faction.
    Faction(FactionId),
    /// Only entities of the given alignment.
    Alignment(Alignment),
    /// Only entities owned by the given player.
    OwnedBy(PlayerId),
    /// Only entities whose rank lies in `[min, max]`.
    RankRange { min: u8, max: u8 },
}

impl Limiter {
    /// Decide whether the bonus applies in this context.
    ///
    /// Filters that need a node attribute discard when the context is
    /// node-less or the attribute is absent: an unverifiable condition
    /// never grants a bonus.
    #[must_use]
    pub fn decide(&self, ctx: &LimitContext<'_>) -> Decision {
        match self {
            Self::CreatureType {
                creature,
                include_upgrades,
            } => match ctx.profile {
                Some(p) if p.is_creature(*creature, *include_upgrades) => Decision::Accept,
                _ => Decision::Discard,
            },

            Self::HasAnotherBonus { kind, subtype } => {
                let found = ctx.accepted.iter().any(|b| {
                    b.kind == *kind && subtype.map_or(true, |s| s.matches(b.subtype))
                });
                if found {
                    Decision::Accept
                } else {
                    Decision::Defer
                }
            }

            Self::NativeTerrain(terrain) => match ctx.profile {
                Some(p) if p.on_native_terrain(*terrain) => Decision::Accept,
                _ => Decision::Discard,
            },

            Self::Faction(faction) => match ctx.profile {
                Some(p) if p.faction == Some(*faction) => Decision::Accept,
                _ => Decision::Discard,
            },

            Self::Alignment(alignment) => match ctx.profile {
                Some(p) if p.alignment == Some(*alignment) => Decision::Accept,
                _ => Decision::Discard,
            },

            Self::OwnedBy(player) => match ctx.profile {
                Some(p) if p.owner == Some(*player) => Decision::Accept,
                _ => Decision::Discard,
            },

            Self::RankRange { min, max } => match ctx.profile.and_then(|p| p.rank) {
                Some(rank) if rank >= *min && rank <= *max => Decision::Accept,
                _ => Decision::Discard,
            },
        }
    }
}

/// An ordered chain of limiters. The empty chain accepts everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimiterChain {
    links: Vec<Limiter>,
}

impl LimiterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-link chain.
    #[must_use]
    pub fn of(limiter: Limiter) -> Self {
        Self {
            links: vec![limiter],
        }
    }

    /// Append a link; evaluated after the existing ones.
    #[must_use]
    pub fn then(mut self, limiter: Limiter) -> Self {
        self.links.push(limiter);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Evaluate all links in order. The first Discard stops the chain;
    /// any surviving Defer makes the whole chain defer.
    #[must_use]
    pub fn evaluate(&self, ctx: &LimitContext<'_>) -> Decision {
        let mut deferred = false;
        for link in &self.links {
            match link.decide(ctx) {
                Decision::Discard => return Decision::Discard,
                Decision::Defer => deferred = true,
                Decision::Accept => {}
            }
        }
        if deferred {
            Decision::Defer
        } else {
            Decision::Accept
        }
    }
}

impl From<Limiter> for LimiterChain {
    fn from(limiter: Limiter) -> Self {
        Self::of(limiter)
    }
}

impl FromIterator<Limiter> for LimiterChain {
    fn from_iter<I: IntoIterator<Item = Limiter>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}
