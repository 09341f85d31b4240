//! A vertex in the propagation graph.
//!
//! Nodes are owned by a `BonusGraph` and addressed by `NodeId`; the edge
//! lists hold handles, never owning pointers, so detach and destroy can
//! never dangle. All mutation goes through graph methods; the node type
//! itself only exposes its state and the per-node result cache.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::bonus::{BonusList, EpochHandle, Selector};
use crate::core::{NodeId, NodeKind};
use crate::limiter::LimiterChain;

use super::profile::NodeProfile;

/// Structured cache key: every parameter that affects a query result.
///
/// Two logically different queries can never share a key because the key
/// *is* the query, not a caller-invented string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub selector: Selector,
    pub limiter: Option<LimiterChain>,
    pub root: Option<NodeId>,
}

/// Per-node memo of query results, valid while `epoch` matches the
/// graph's generation counter.
#[derive(Debug, Default)]
pub(crate) struct QueryCache {
    epoch: u64,
    results: FxHashMap<QueryKey, BonusList>,
}

impl QueryCache {
    pub(crate) fn lookup(&self, epoch: u64, key: &QueryKey) -> Option<BonusList> {
        if self.epoch == epoch {
            self.results.get(key).cloned()
        } else {
            None
        }
    }

    pub(crate) fn store(&mut self, epoch: u64, key: QueryKey, result: BonusList) {
        if self.epoch != epoch {
            self.results.clear();
            self.epoch = epoch;
        }
        self.results.insert(key, result);
    }
}

/// A node: local bonuses, exported bonuses, edges, profile, cache.
#[derive(Debug)]
pub struct BonusNode {
    id: NodeId,
    kind: NodeKind,
    description: String,
    profile: NodeProfile,
    /// Bonuses in force on this node (attached here and applicable here).
    active: BonusList,
    /// Bonuses attached here, offered to descendants. Superset of `active`
    /// by reference identity: a propagator can exclude its own node.
    exported: BonusList,
    parents: SmallVec<[NodeId; 4]>,
    children: SmallVec<[NodeId; 4]>,
    cache: RefCell<QueryCache>,
}

impl BonusNode {
    pub(crate) fn new(id: NodeId, kind: NodeKind, epoch: EpochHandle) -> Self {
        Self {
            id,
            kind,
            description: String::new(),
            profile: NodeProfile::default(),
            active: BonusList::tree_linked(epoch.clone()),
            exported: BonusList::tree_linked(epoch),
            parents: SmallVec::new(),
            children: SmallVec::new(),
            cache: RefCell::new(QueryCache::default()),
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn profile(&self) -> &NodeProfile {
        &self.profile
    }

    /// Bonuses currently in force on this node, without inheritance.
    #[must_use]
    pub fn active_bonuses(&self) -> &BonusList {
        &self.active
    }

    /// Bonuses this node offers to other nodes.
    #[must_use]
    pub fn exported_bonuses(&self) -> &BonusList {
        &self.exported
    }

    #[must_use]
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node with no parents and no children.
    #[must_use]
    pub fn is_independent(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }

    // === Crate-internal mutation, called by BonusGraph ===

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_profile(&mut self, profile: NodeProfile) {
        self.profile = profile;
    }

    pub(crate) fn active_mut(&mut self) -> &mut BonusList {
        &mut self.active
    }

    pub(crate) fn exported_mut(&mut self) -> &mut BonusList {
        &mut self.exported
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        self.parents.push(parent);
    }

    pub(crate) fn remove_parent(&mut self, parent: NodeId) -> bool {
        match self.parents.iter().position(|&p| p == parent) {
            Some(idx) => {
                self.parents.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn cache(&self) -> &RefCell<QueryCache> {
        &self.cache
    }
}
