//! The propagation graph: arena, edges, queries, caching, turn decay.
//!
//! A `BonusGraph` owns every node and the generation counter. All graph
//! edits go through `&mut self` methods; queries take `&self` and memoize
//! per node. The counter is bumped by every structural mutation anywhere,
//! so a cache entry is valid exactly while nothing in the graph changed:
//! coarse, but impossible to get stale.

use std::cell::Cell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::bonus::{Bonus, BonusList, EpochHandle, Selector, SharedBonus};
use crate::core::{BonusKind, GraphConfig, NodeId, NodeKind, Subtype};
use crate::limiter::{resolve_accepted, LimiterChain};

use super::node::{BonusNode, QueryKey};
use super::profile::NodeProfile;

/// Owner of the propagation graph and its generation counter.
#[derive(Debug)]
pub struct BonusGraph {
    config: GraphConfig,
    nodes: FxHashMap<NodeId, BonusNode>,
    epoch: EpochHandle,
    next_node: u32,
}

impl Default for BonusGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BonusGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: FxHashMap::default(),
            epoch: Rc::new(Cell::new(0)),
            next_node: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Current value of the generation counter.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    // === Node lifecycle ===

    /// Create an empty, independent node.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes
            .insert(id, BonusNode::new(id, kind, self.epoch.clone()));
        debug!(%id, ?kind, "node added");
        id
    }

    /// Destroy a node and the bonuses it owns.
    ///
    /// The caller must detach the node first; destroying a node with live
    /// edges corrupts the graph and is a contract violation.
    pub fn remove_node(&mut self, id: NodeId) {
        let node = self.nodes.remove(&id).expect("unknown node id");
        debug_assert!(
            node.is_independent(),
            "node removed while still attached: {id}"
        );
        self.bump_epoch();
        debug!(%id, "node removed");
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&BonusNode> {
        self.nodes.get(&id)
    }

    fn expect(&self, id: NodeId) -> &BonusNode {
        self.nodes.get(&id).expect("unknown node id")
    }

    fn expect_mut(&mut self, id: NodeId) -> &mut BonusNode {
        self.nodes.get_mut(&id).expect("unknown node id")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes, e.g. for an external serializer.
    pub fn iter(&self) -> impl Iterator<Item = &BonusNode> {
        self.nodes.values()
    }

    /// Replace a node's game-facing profile. Invalidates caches: limiter
    /// outcomes depend on profile fields.
    pub fn set_profile(&mut self, id: NodeId, profile: NodeProfile) {
        self.expect_mut(id).set_profile(profile);
        self.bump_epoch();
    }

    /// Set a node's human-readable description. Not a structural change.
    pub fn set_description(&mut self, id: NodeId, description: impl Into<String>) {
        self.expect_mut(id).set_description(description.into());
    }

    // === Edge maintenance ===

    /// Make `parent` a parent of `child`. Edge lists on both sides stay
    /// symmetric. Attaching to itself or attaching the same parent twice
    /// is a programming error.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        debug_assert_ne!(child, parent, "node cannot be attached to itself");
        debug_assert!(
            !self.expect(child).parents().contains(&parent),
            "duplicate attach of {child} to {parent}"
        );
        // Assert both exist before mutating either side.
        let _ = self.expect(parent);

        self.expect_mut(child).add_parent(parent);
        self.expect_mut(parent).add_child(child);
        self.bump_epoch();
        debug!(%child, %parent, "attached");
    }

    /// Remove the `child`→`parent` edge. Detaching a node that is not
    /// actually a parent is a no-op, not an error.
    pub fn detach(&mut self, child: NodeId, parent: NodeId) {
        let removed = self.expect_mut(child).remove_parent(parent);
        if !removed {
            return;
        }
        self.expect_mut(parent).remove_child(child);
        self.bump_epoch();
        debug!(%child, %parent, "detached");
    }

    /// Detach `child` from every parent.
    pub fn detach_from_all(&mut self, child: NodeId) {
        let parents: Vec<NodeId> = self.expect(child).parents().to_vec();
        for parent in parents {
            self.detach(child, parent);
        }
    }

    // === Bonus lifecycle ===

    /// Attach a bonus to a node; the node takes ownership. The bonus joins
    /// the node's exported list always, and its active list unless its
    /// propagator rejects the node itself.
    pub fn add_bonus(&mut self, id: NodeId, bonus: Bonus) -> SharedBonus {
        let shared = bonus.shared();
        let node = self.expect_mut(id);
        let applies_here = match &shared.propagator {
            None => true,
            Some(p) => p.should_attach(node.kind()),
        };
        node.exported_mut().push(Rc::clone(&shared));
        if applies_here {
            node.active_mut().push(Rc::clone(&shared));
        }
        debug!(%id, kind = %shared.kind, "bonus added");
        shared
    }

    /// Remove a bonus from its owning node, by reference identity.
    /// Returns false when the node does not own this bonus.
    pub fn remove_bonus(&mut self, id: NodeId, bonus: &SharedBonus) -> bool {
        let node = self.expect_mut(id);
        let removed = node.exported_mut().remove_ptr(bonus);
        node.active_mut().remove_ptr(bonus);
        if removed {
            debug!(%id, kind = %bonus.kind, "bonus removed");
        }
        removed
    }

    /// Fold a bonus into an existing one with the same kind and subtype by
    /// adding values; insert it when no such bonus exists.
    pub fn accumulate_bonus(&mut self, id: NodeId, bonus: Bonus) {
        let existing = self
            .expect(id)
            .exported_bonuses()
            .iter()
            .find(|b| b.kind == bonus.kind && b.subtype == bonus.subtype)
            .cloned();

        match existing {
            Some(target) => {
                target.accumulate(bonus.val.get());
                // Value changes do not touch list structure; invalidate
                // caches explicitly.
                self.bump_epoch();
            }
            None => {
                self.add_bonus(id, bonus);
            }
        }
    }

    /// Advance battle time by one turn for this node's bonuses: decrement
    /// turn-counted ones, drop those that expire, and drop bonuses that
    /// last only until the bearer's own turn.
    pub fn turn_passed(&mut self, id: NodeId) {
        // Remaining-turn counters feed lookahead selectors; invalidate
        // even when nothing expires.
        self.bump_epoch();

        let mut expired: Vec<SharedBonus> = Vec::new();
        for bonus in self.expect(id).exported_bonuses() {
            if bonus.duration.is_turn_counted() {
                bonus.turns_remain.set(bonus.turns_remain.get() - 1);
                if bonus.turns_remain.get() <= 0 {
                    expired.push(Rc::clone(bonus));
                    continue;
                }
            }
            if bonus.until_own_turn() {
                expired.push(Rc::clone(bonus));
            }
        }

        for bonus in &expired {
            self.remove_bonus(id, bonus);
        }
        if !expired.is_empty() {
            debug!(%id, count = expired.len(), "bonuses expired with turn");
        }
    }

    // === Queries ===

    /// The main query entry point: all bonuses visible on `node` matching
    /// `selector`, after limiter resolution against `root` (defaults to
    /// the queried node).
    ///
    /// Visible means: the node's own active bonuses, plus every ancestor's
    /// exported bonuses: a plain bonus is inherited along the edge, one
    /// with a propagator only where the propagator accepts the queried
    /// node. The result is freshly allocated; source lists are untouched.
    #[must_use]
    pub fn get_all_bonuses(
        &self,
        node: NodeId,
        selector: &Selector,
        limiter: Option<&LimiterChain>,
        root: Option<NodeId>,
    ) -> BonusList {
        if !self.config.caching_enabled {
            return self.compute_query(node, selector, limiter, root);
        }

        let key = QueryKey {
            selector: selector.clone(),
            limiter: limiter.cloned(),
            root,
        };
        let epoch = self.epoch.get();

        if let Some(hit) = self.expect(node).cache().borrow().lookup(epoch, &key) {
            trace!(%node, "query cache hit");
            return hit;
        }

        trace!(%node, "query cache miss");
        let result = self.compute_query(node, selector, limiter, root);
        self.expect(node)
            .cache()
            .borrow_mut()
            .store(epoch, key, result.clone());
        result
    }

    fn compute_query(
        &self,
        node: NodeId,
        selector: &Selector,
        limiter: Option<&LimiterChain>,
        root: Option<NodeId>,
    ) -> BonusList {
        let querying = self.expect(node);
        let dest_kind = querying.kind();

        // Ancestors first, then own active bonuses; each ancestor visited
        // once even in diamond-shaped graphs.
        let mut candidates = BonusList::new();
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        visited.insert(node);
        for &parent in querying.parents() {
            self.collect_exported(parent, dest_kind, &mut candidates, &mut visited);
        }
        for bonus in querying.active_bonuses() {
            candidates.push(Rc::clone(bonus));
        }
        candidates.eliminate_duplicates();

        // Limiters and calculators evaluate against the query root.
        let context = root.map_or(querying, |r| self.expect(r));
        let profile = context.profile();

        let mut resolved = BonusList::new();
        for bonus in candidates.iter() {
            match &bonus.calculator {
                Some(calc) => {
                    let copy = (**bonus).clone();
                    copy.val.set(calc.value(bonus, profile));
                    resolved.push(copy.shared());
                }
                None => resolved.push(Rc::clone(bonus)),
            }
        }

        let accepted = resolve_accepted(
            &resolved,
            limiter,
            Some(profile),
            self.config.defer_iteration_cap,
        );

        let mut out = BonusList::new();
        for bonus in accepted.iter() {
            if selector.matches(bonus) {
                out.push(Rc::clone(bonus));
            }
        }
        out
    }

    fn collect_exported(
        &self,
        node: NodeId,
        dest_kind: NodeKind,
        out: &mut BonusList,
        visited: &mut FxHashSet<NodeId>,
    ) {
        if !visited.insert(node) {
            return;
        }
        let current = self.expect(node);
        for &parent in current.parents() {
            self.collect_exported(parent, dest_kind, out, visited);
        }
        for bonus in current.exported_bonuses() {
            let visible = match &bonus.propagator {
                None => true,
                Some(p) => p.should_attach(dest_kind),
            };
            if visible {
                out.push(Rc::clone(bonus));
            }
        }
    }

    // === Derived convenience queries ===

    /// Aggregate value of all visible bonuses matching `selector`.
    #[must_use]
    pub fn val_of(&self, node: NodeId, selector: &Selector) -> i64 {
        self.get_all_bonuses(node, selector, None, None).total_value()
    }

    /// Aggregate value for a kind and subtype.
    #[must_use]
    pub fn val_of_kind(&self, node: NodeId, kind: BonusKind, subtype: Subtype) -> i64 {
        self.val_of(node, &Selector::kind_subtype(kind, subtype))
    }

    #[must_use]
    pub fn has_bonus(&self, node: NodeId, selector: &Selector) -> bool {
        !self.get_all_bonuses(node, selector, None, None).is_empty()
    }

    #[must_use]
    pub fn has_bonus_of(&self, node: NodeId, kind: BonusKind, subtype: Subtype) -> bool {
        self.has_bonus(node, &Selector::kind_subtype(kind, subtype))
    }

    #[must_use]
    pub fn bonus_count(&self, node: NodeId, selector: &Selector) -> usize {
        self.get_all_bonuses(node, selector, None, None).len()
    }

    /// First visible bonus matching `selector`, in traversal order
    /// (ancestors before the node's own bonuses).
    #[must_use]
    pub fn first_bonus(&self, node: NodeId, selector: &Selector) -> Option<SharedBonus> {
        self.get_all_bonuses(node, selector, None, None)
            .get(0)
            .cloned()
    }

    /// Aggregate for a kind, clamped to `[lo, hi]`, the shape of
    /// morale/luck-style totals bounded to [-3, +3].
    #[must_use]
    pub fn clamped_val(&self, node: NodeId, kind: BonusKind, lo: i64, hi: i64) -> i64 {
        self.val_of(node, &Selector::kind(kind)).clamp(lo, hi)
    }

    /// Every bonus visible on the node.
    #[must_use]
    pub fn all_bonuses(&self, node: NodeId) -> BonusList {
        self.get_all_bonuses(node, &Selector::Anything, None, None)
    }
}
