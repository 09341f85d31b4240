//! Query predicate algebra over bonus fields.
//!
//! Base selectors test one field against a value captured at construction
//! time; `All`/`AnyOf` combine them with short-circuit AND/OR. Selectors
//! derive `Eq + Hash`, so a selector is its own cache-key component, not
//! a hand-built key string.

use serde::{Deserialize, Serialize};

use crate::core::{BonusKind, DurationSet, SourceId, SourceKind, Subtype};

use super::bonus::Bonus;

/// Composable predicate over a single bonus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Matches every bonus.
    Anything,

    /// Kind tag equality.
    Kind(BonusKind),

    /// Subtype equality, honoring the `Subtype::ANY` wildcard on
    /// either side.
    SubtypeIs(Subtype),

    /// Source category equality.
    SourceKindIs(SourceKind),

    /// Provenance: source category plus id, honoring `SourceId::ANY`.
    Source { kind: SourceKind, id: SourceId },

    /// Duration mask equality.
    DurationIs(DurationSet),

    /// Auxiliary info equality.
    InfoIs(i64),

    /// Will the bonus still be active after N more turns? Lasting means:
    /// N ≤ 0, or the bonus is not turn-counted, or more than N turns
    /// remain. Used to decide which bonuses survive a lookahead.
    WillLastTurns(i32),

    /// Conjunction, evaluated left to right, stops on first false.
    All(Vec<Selector>),

    /// Disjunction, evaluated left to right, stops on first true.
    AnyOf(Vec<Selector>),
}

impl Selector {
    #[must_use]
    pub fn matches(&self, bonus: &Bonus) -> bool {
        match self {
            Self::Anything => true,
            Self::Kind(kind) => bonus.kind == *kind,
            Self::SubtypeIs(subtype) => subtype.matches(bonus.subtype),
            Self::SourceKindIs(kind) => bonus.source.kind == *kind,
            Self::Source { kind, id } => bonus.is_from(*kind, *id),
            Self::DurationIs(duration) => bonus.duration == *duration,
            Self::InfoIs(info) => bonus.info == *info,
            Self::WillLastTurns(turns) => {
                *turns <= 0
                    || !bonus.duration.is_turn_counted()
                    || bonus.turns_remain.get() > *turns
            }
            Self::All(selectors) => selectors.iter().all(|s| s.matches(bonus)),
            Self::AnyOf(selectors) => selectors.iter().any(|s| s.matches(bonus)),
        }
    }

    // === Base constructors ===

    #[must_use]
    pub fn kind(kind: BonusKind) -> Self {
        Self::Kind(kind)
    }

    #[must_use]
    pub fn subtype(subtype: Subtype) -> Self {
        Self::SubtypeIs(subtype)
    }

    #[must_use]
    pub fn source_kind(kind: SourceKind) -> Self {
        Self::SourceKindIs(kind)
    }

    #[must_use]
    pub fn source(kind: SourceKind, id: SourceId) -> Self {
        Self::Source { kind, id }
    }

    #[must_use]
    pub fn duration(duration: DurationSet) -> Self {
        Self::DurationIs(duration)
    }

    #[must_use]
    pub fn info(info: i64) -> Self {
        Self::InfoIs(info)
    }

    #[must_use]
    pub fn will_last_turns(turns: i32) -> Self {
        Self::WillLastTurns(turns)
    }

    // === Composite constructors ===

    #[must_use]
    pub fn kind_subtype(kind: BonusKind, subtype: Subtype) -> Self {
        Self::Kind(kind).and(Self::SubtypeIs(subtype))
    }

    #[must_use]
    pub fn kind_subtype_info(kind: BonusKind, subtype: Subtype, info: i64) -> Self {
        Self::kind_subtype(kind, subtype).and(Self::InfoIs(info))
    }

    // === Combinators ===

    /// Conjoin with another selector.
    #[must_use]
    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::All(mut selectors) => {
                selectors.push(other);
                Self::All(selectors)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Disjoin with another selector.
    #[must_use]
    pub fn or(self, other: Selector) -> Self {
        match self {
            Self::AnyOf(mut selectors) => {
                selectors.push(other);
                Self::AnyOf(selectors)
            }
            _ => Self::AnyOf(vec![self, other]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusList;
    use crate::core::BonusSource;
    use std::rc::Rc;

    const MORALE: BonusKind = BonusKind::new(5);
    const LUCK: BonusKind = BonusKind::new(6);

    fn from_source(kind: u8, id: u32) -> BonusSource {
        BonusSource::new(SourceKind::new(kind), SourceId::new(id))
    }

    fn bonus(kind: BonusKind) -> Bonus {
        Bonus::new(kind, DurationSet::PERMANENT, 1, from_source(2, 40))
    }

    #[test]
    fn test_kind_selector() {
        let b = bonus(MORALE);
        assert!(Selector::kind(MORALE).matches(&b));
        assert!(!Selector::kind(LUCK).matches(&b));
    }

    #[test]
    fn test_subtype_wildcard_matches_both_ways() {
        let wild = bonus(MORALE); // subtype defaults to ANY
        let narrow = bonus(MORALE).with_subtype(Subtype::new(3));

        assert!(Selector::subtype(Subtype::new(3)).matches(&wild));
        assert!(Selector::subtype(Subtype::new(3)).matches(&narrow));
        assert!(Selector::subtype(Subtype::ANY).matches(&narrow));
        assert!(!Selector::subtype(Subtype::new(4)).matches(&narrow));
    }

    #[test]
    fn test_provenance_with_any_sentinel() {
        let b = bonus(MORALE);
        assert!(Selector::source(SourceKind::new(2), SourceId::new(40)).matches(&b));
        assert!(Selector::source(SourceKind::new(2), SourceId::ANY).matches(&b));
        assert!(!Selector::source(SourceKind::new(2), SourceId::new(41)).matches(&b));
        assert!(!Selector::source(SourceKind::new(3), SourceId::ANY).matches(&b));
    }

    #[test]
    fn test_will_last_turns() {
        let fading = bonus(MORALE);
        let mut b = fading;
        b.duration = DurationSet::N_TURNS;
        let b = b.with_turns(2);

        assert!(Selector::will_last_turns(0).matches(&b));
        assert!(Selector::will_last_turns(1).matches(&b));
        assert!(!Selector::will_last_turns(2).matches(&b));
        assert!(!Selector::will_last_turns(3).matches(&b));

        let permanent = bonus(MORALE);
        assert!(Selector::will_last_turns(100).matches(&permanent));
    }

    #[test]
    fn test_and_or_short_circuit_semantics() {
        let b = bonus(MORALE).with_info(7);

        assert!(Selector::kind(MORALE).and(Selector::info(7)).matches(&b));
        assert!(!Selector::kind(MORALE).and(Selector::info(8)).matches(&b));
        assert!(Selector::kind(LUCK).or(Selector::info(7)).matches(&b));
        assert!(!Selector::kind(LUCK).or(Selector::info(8)).matches(&b));
    }

    #[test]
    fn test_and_flattens() {
        let s = Selector::kind(MORALE)
            .and(Selector::info(1))
            .and(Selector::subtype(Subtype::new(2)));
        match s {
            Selector::All(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected All, got {other:?}"),
        }
    }

    #[test]
    fn test_conjunction_equals_intersection() {
        let s1 = Selector::kind(MORALE);
        let s2 = Selector::info(7);

        let mut list = BonusList::new();
        list.push(bonus(MORALE).with_info(7).shared());
        list.push(bonus(MORALE).with_info(8).shared());
        list.push(bonus(LUCK).with_info(7).shared());

        let both = list.get_bonuses(&s1.clone().and(s2.clone()), None);
        let first = list.get_bonuses(&s1, None);
        let second = list.get_bonuses(&s2, None);

        for b in both.iter() {
            assert!(first.contains_ptr(b) && second.contains_ptr(b));
        }
        for b in first.iter() {
            if second.contains_ptr(b) {
                assert!(both.contains_ptr(b));
            }
        }
        assert_eq!(both.len(), 1);
        assert!(Rc::ptr_eq(both.get(0).unwrap(), list.get(0).unwrap()));
    }

    #[test]
    fn test_selector_serialization() {
        let s = Selector::kind_subtype(MORALE, Subtype::new(1)).or(Selector::will_last_turns(2));
        let json = serde_json::to_string(&s).unwrap();
        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
