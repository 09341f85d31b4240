//! Game-facing node attributes.
//!
//! Limiters and calculators decide against a node's *profile*: the small
//! set of attributes the stock filters understand. Every field is optional;
//! a filter that needs a missing attribute rejects the bonus rather than
//! guessing. Embedding code keeps the profile current as the underlying
//! entity changes (moves terrain, changes owner, upgrades).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Alignment, CreatureId, FactionId, PlayerId, TerrainId};

/// Attributes of a node visible to limiters and calculators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProfile {
    /// Creature type of the entity behind this node, if any.
    pub creature: Option<CreatureId>,
    /// Creature types this creature is an upgrade of, nearest first.
    pub upgrade_of: SmallVec<[CreatureId; 2]>,
    /// Terrain the entity currently stands on.
    pub terrain: Option<TerrainId>,
    /// Terrain the entity is native to.
    pub native_terrain: Option<TerrainId>,
    pub faction: Option<FactionId>,
    pub alignment: Option<Alignment>,
    pub owner: Option<PlayerId>,
    /// Numeric rank (creature level, tier), used by range filters
    /// and rank-scaled calculators.
    pub rank: Option<u8>,
}

impl NodeProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_creature(mut self, creature: CreatureId) -> Self {
        self.creature = Some(creature);
        self
    }

    #[must_use]
    pub fn with_upgrade_of(mut self, bases: impl IntoIterator<Item = CreatureId>) -> Self {
        self.upgrade_of = bases.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: TerrainId) -> Self {
        self.terrain = Some(terrain);
        self
    }

    #[must_use]
    pub fn with_native_terrain(mut self, terrain: TerrainId) -> Self {
        self.native_terrain = Some(terrain);
        self
    }

    #[must_use]
    pub fn with_faction(mut self, faction: FactionId) -> Self {
        self.faction = Some(faction);
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Is this node's creature `creature`, or (optionally) one of its
    /// upgrades?
    #[must_use]
    pub fn is_creature(&self, creature: CreatureId, include_upgrades: bool) -> bool {
        match self.creature {
            Some(own) if own == creature => true,
            Some(_) if include_upgrades => self.upgrade_of.contains(&creature),
            _ => false,
        }
    }

    /// Is the entity standing on its native terrain of type `terrain`?
    #[must_use]
    pub fn on_native_terrain(&self, terrain: TerrainId) -> bool {
        self.native_terrain == Some(terrain) && self.terrain == Some(terrain)
    }
}
