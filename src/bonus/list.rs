//! Ordered bonus container.
//!
//! A `BonusList` holds shared references; the owning node keeps the bonus
//! alive, the list just sequences it. Insertion order is stable, which
//! makes duplicate elimination and first-match queries deterministic.
//!
//! ## Tree linkage
//!
//! Lists inside a live graph carry a handle to the graph's generation
//! counter. Every structural mutation of such a list bumps the counter,
//! which invalidates every node's query cache at once. Free-standing lists
//! (query results, scratch lists) have no handle and mutate silently.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::{ValueKind, DEFAULT_DEFER_ITERATION_CAP};
use crate::limiter::{resolve_accepted, LimiterChain};

use super::bonus::SharedBonus;
use super::selector::Selector;

/// Shared generation counter handle. The graph owns the counter; its
/// tree-linked lists hold clones of this handle.
pub type EpochHandle = Rc<Cell<u64>>;

/// Insertion-ordered sequence of shared bonus references.
#[derive(Clone, Debug, Default)]
pub struct BonusList {
    items: Vec<SharedBonus>,
    /// Present iff the list is part of a live graph.
    epoch: Option<EpochHandle>,
}

impl BonusList {
    /// Create a free-standing list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree-linked list whose mutations bump `epoch`.
    #[must_use]
    pub fn tree_linked(epoch: EpochHandle) -> Self {
        Self {
            items: Vec::new(),
            epoch: Some(epoch),
        }
    }

    /// Whether mutations invalidate graph caches.
    #[must_use]
    pub fn is_tree_linked(&self) -> bool {
        self.epoch.is_some()
    }

    fn touch(&self) {
        if let Some(epoch) = &self.epoch {
            epoch.set(epoch.get() + 1);
        }
    }

    // === Container operations ===

    pub fn push(&mut self, bonus: SharedBonus) {
        self.items.push(bonus);
        self.touch();
    }

    /// Remove by position. Panics if out of bounds, like `Vec::remove`.
    pub fn remove_at(&mut self, index: usize) -> SharedBonus {
        let removed = self.items.remove(index);
        self.touch();
        removed
    }

    /// Remove the entry that is the same allocation as `bonus`.
    /// Returns false (and stays silent) when the reference is not present.
    pub fn remove_ptr(&mut self, bonus: &SharedBonus) -> bool {
        let before = self.items.len();
        self.items.retain(|b| !Rc::ptr_eq(b, bonus));
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.touch();
        }
    }

    /// Keep only bonuses for which `pred` holds.
    pub fn retain(&mut self, mut pred: impl FnMut(&SharedBonus) -> bool) {
        let before = self.items.len();
        self.items.retain(|b| pred(b));
        if self.items.len() != before {
            self.touch();
        }
    }

    /// Structural filter-in-place: drop bonuses for which `pred` holds.
    pub fn remove_if(&mut self, mut pred: impl FnMut(&SharedBonus) -> bool) {
        self.retain(|b| !pred(b));
    }

    /// Remove entries that reference the same allocation as another
    /// entry, keeping the last occurrence. Applying twice is a no-op.
    ///
    /// Last-writer-wins matters: `total_value` resolves competing `Base`
    /// entries by position, so dedup must not change which entry is last.
    pub fn eliminate_duplicates(&mut self) {
        let before = self.items.len();
        let mut keep = vec![true; before];
        for i in 0..before {
            if self.items[i + 1..]
                .iter()
                .any(|later| Rc::ptr_eq(later, &self.items[i]))
            {
                keep[i] = false;
            }
        }

        let mut index = 0;
        self.items.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
        if self.items.len() != before {
            self.touch();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SharedBonus> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SharedBonus> {
        self.items.iter()
    }

    /// Does the list contain this exact allocation?
    #[must_use]
    pub fn contains_ptr(&self, bonus: &SharedBonus) -> bool {
        self.items.iter().any(|b| Rc::ptr_eq(b, bonus))
    }

    // === Domain operations ===

    /// Aggregate all contained values honoring each bonus's value kind.
    ///
    /// Fold order, which is load-bearing:
    /// 1. base term (last `Base` wins; 0 if absent) plus all `Additive`,
    /// 2. `PercentToBase` of the *original* base term,
    /// 3. `PercentToAll` of the running total,
    /// 4. the max across `IndependentMax` and the min across
    ///    `IndependentMin`, each folded in once as an additive term.
    #[must_use]
    pub fn total_value(&self) -> i64 {
        let mut base = 0i64;
        let mut additive = 0i64;
        let mut percent_to_base = 0i64;
        let mut percent_to_all = 0i64;
        let mut indep_max: Option<i64> = None;
        let mut indep_min: Option<i64> = None;

        for bonus in &self.items {
            let val = bonus.val.get();
            match bonus.val_kind {
                ValueKind::Additive => additive += val,
                ValueKind::Base => base = val,
                ValueKind::PercentToBase => percent_to_base += val,
                ValueKind::PercentToAll => percent_to_all += val,
                ValueKind::IndependentMax => {
                    indep_max = Some(indep_max.map_or(val, |m| m.max(val)));
                }
                ValueKind::IndependentMin => {
                    indep_min = Some(indep_min.map_or(val, |m| m.min(val)));
                }
            }
        }

        let mut total = base + additive;
        total += base * percent_to_base / 100;
        total += total * percent_to_all / 100;
        if let Some(max) = indep_max {
            total += max;
        }
        if let Some(min) = indep_min {
            total += min;
        }
        total
    }

    /// Copy every bonus matching `selector` into a fresh list, after each
    /// bonus's own limiter chain (ANDed with `limiter`, if given) accepts
    /// it in a contextless evaluation.
    #[must_use]
    pub fn get_bonuses(&self, selector: &Selector, limiter: Option<&LimiterChain>) -> Self {
        let accepted = resolve_accepted(self, limiter, None, DEFAULT_DEFER_ITERATION_CAP);
        let mut out = Self::new();
        for bonus in accepted.iter() {
            if selector.matches(bonus) {
                out.push(Rc::clone(bonus));
            }
        }
        out
    }

    /// First matching bonus in insertion order.
    #[must_use]
    pub fn get_first(&self, selector: &Selector) -> Option<&SharedBonus> {
        self.items.iter().find(|b| selector.matches(b))
    }

    /// Aggregate value of the matching subset.
    #[must_use]
    pub fn val_of(&self, selector: &Selector) -> i64 {
        self.get_bonuses(selector, None).total_value()
    }
}

impl FromIterator<SharedBonus> for BonusList {
    fn from_iter<I: IntoIterator<Item = SharedBonus>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            epoch: None,
        }
    }
}

impl<'a> IntoIterator for &'a BonusList {
    type Item = &'a SharedBonus;
    type IntoIter = std::slice::Iter<'a, SharedBonus>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::Bonus;
    use crate::core::{BonusKind, BonusSource, DurationSet};

    const ATTACK: BonusKind = BonusKind::new(1);
    const MORALE: BonusKind = BonusKind::new(2);

    fn valued(kind: BonusKind, val: i64, val_kind: ValueKind) -> SharedBonus {
        Bonus::new(kind, DurationSet::PERMANENT, val, BonusSource::default())
            .with_value_kind(val_kind)
            .shared()
    }

    #[test]
    fn test_total_value_fold_order() {
        // 100 base, +50% of base, +10% of all: 100 + 50 + 15 = 165.
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 100, ValueKind::Base));
        list.push(valued(ATTACK, 50, ValueKind::PercentToBase));
        list.push(valued(ATTACK, 10, ValueKind::PercentToAll));
        assert_eq!(list.total_value(), 165);
    }

    #[test]
    fn test_total_value_last_base_wins() {
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 100, ValueKind::Base));
        list.push(valued(ATTACK, 40, ValueKind::Base));
        list.push(valued(ATTACK, 3, ValueKind::Additive));
        assert_eq!(list.total_value(), 43);
    }

    #[test]
    fn test_total_value_percent_to_base_without_base() {
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 50, ValueKind::PercentToBase));
        list.push(valued(ATTACK, 7, ValueKind::Additive));
        assert_eq!(list.total_value(), 7);
    }

    #[test]
    fn test_independent_max_contributes_once() {
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 3, ValueKind::IndependentMax));
        list.push(valued(ATTACK, 7, ValueKind::IndependentMax));
        list.push(valued(ATTACK, 5, ValueKind::IndependentMax));
        assert_eq!(list.total_value(), 7);
    }

    #[test]
    fn test_independent_min() {
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 10, ValueKind::Additive));
        list.push(valued(ATTACK, -2, ValueKind::IndependentMin));
        list.push(valued(ATTACK, -5, ValueKind::IndependentMin));
        assert_eq!(list.total_value(), 5);
    }

    #[test]
    fn test_eliminate_duplicates_keeps_last_and_is_idempotent() {
        let a = valued(ATTACK, 1, ValueKind::Additive);
        let b = valued(ATTACK, 2, ValueKind::Additive);

        let mut list = BonusList::new();
        list.push(Rc::clone(&a));
        list.push(Rc::clone(&b));
        list.push(Rc::clone(&a));
        list.push(Rc::clone(&a));

        list.eliminate_duplicates();
        assert_eq!(list.len(), 2);
        assert!(Rc::ptr_eq(list.get(0).unwrap(), &b));
        assert!(Rc::ptr_eq(list.get(1).unwrap(), &a));

        let once: Vec<_> = list.iter().cloned().collect();
        list.eliminate_duplicates();
        assert_eq!(list.len(), once.len());
        for (kept, expected) in list.iter().zip(&once) {
            assert!(Rc::ptr_eq(kept, expected));
        }
    }

    #[test]
    fn test_eliminate_duplicates_preserves_winning_base() {
        // The later of two competing Base entries wins in total_value;
        // removing a duplicated entry must not change which one is last.
        let a = valued(ATTACK, 100, ValueKind::Base);
        let b = valued(ATTACK, 40, ValueKind::Base);

        let mut list = BonusList::new();
        list.push(Rc::clone(&a));
        list.push(Rc::clone(&b));
        list.push(Rc::clone(&a));

        assert_eq!(list.total_value(), 100);
        list.eliminate_duplicates();
        assert_eq!(list.len(), 2);
        assert_eq!(list.total_value(), 100);
    }

    #[test]
    fn test_remove_ptr_only_touches_identity() {
        let a = valued(ATTACK, 1, ValueKind::Additive);
        // Equal contents, different allocation.
        let twin = valued(ATTACK, 1, ValueKind::Additive);

        let mut list = BonusList::new();
        list.push(Rc::clone(&a));
        list.push(Rc::clone(&twin));

        assert!(list.remove_ptr(&a));
        assert_eq!(list.len(), 1);
        assert!(Rc::ptr_eq(list.get(0).unwrap(), &twin));
        assert!(!list.remove_ptr(&a));
    }

    #[test]
    fn test_get_first_is_insertion_ordered() {
        let first = valued(MORALE, 1, ValueKind::Additive);
        let second = valued(MORALE, 2, ValueKind::Additive);

        let mut list = BonusList::new();
        list.push(valued(ATTACK, 9, ValueKind::Additive));
        list.push(Rc::clone(&first));
        list.push(Rc::clone(&second));

        let found = list.get_first(&Selector::kind(MORALE)).unwrap();
        assert!(Rc::ptr_eq(found, &first));
        assert!(list.get_first(&Selector::kind(BonusKind::new(9))).is_none());
    }

    #[test]
    fn test_tree_linked_mutations_bump_epoch() {
        let epoch: EpochHandle = Rc::new(Cell::new(0));
        let mut list = BonusList::tree_linked(Rc::clone(&epoch));
        assert!(list.is_tree_linked());

        list.push(valued(ATTACK, 1, ValueKind::Additive));
        assert_eq!(epoch.get(), 1);

        list.remove_at(0);
        assert_eq!(epoch.get(), 2);

        // Clearing an already-empty list is not a structural change.
        list.clear();
        assert_eq!(epoch.get(), 2);
    }

    #[test]
    fn test_free_standing_list_is_silent() {
        let mut list = BonusList::new();
        assert!(!list.is_tree_linked());
        list.push(valued(ATTACK, 1, ValueKind::Additive));
        list.clear();
    }

    #[test]
    fn test_remove_if() {
        let mut list = BonusList::new();
        list.push(valued(ATTACK, 1, ValueKind::Additive));
        list.push(valued(MORALE, 2, ValueKind::Additive));
        list.push(valued(ATTACK, 3, ValueKind::Additive));

        list.remove_if(|b| b.kind == ATTACK);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().kind, MORALE);
    }
}
