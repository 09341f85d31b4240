//! Turn decay and duration integration tests.

use bonus_graph::{
    Bonus, BonusGraph, BonusKind, BonusSource, DurationSet, NodeKind, Selector, Subtype,
};

const STACK: NodeKind = NodeKind::new(1);

const HASTE: BonusKind = BonusKind::new(1);
const SHIELD: BonusKind = BonusKind::new(2);

fn spell(kind: BonusKind, val: i64, duration: DurationSet) -> Bonus {
    Bonus::new(kind, duration, val, BonusSource::default())
}

/// A one-turn bonus is gone after a single turn.
#[test]
fn test_single_turn_bonus_expires() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(HASTE, 3, DurationSet::N_TURNS).with_turns(1));

    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 3);

    graph.turn_passed(stack);
    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 0);
    assert!(graph.node(stack).unwrap().exported_bonuses().is_empty());
}

/// A two-turn bonus survives one turn with one remaining, then expires.
#[test]
fn test_two_turn_bonus_counts_down() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    let handle = graph.add_bonus(stack, spell(HASTE, 3, DurationSet::N_TURNS).with_turns(2));

    graph.turn_passed(stack);
    assert_eq!(handle.turns_remain.get(), 1);
    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 3);

    graph.turn_passed(stack);
    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 0);
}

/// Permanent bonuses ignore turn decay.
#[test]
fn test_permanent_bonus_survives_turns() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(SHIELD, 2, DurationSet::PERMANENT));

    for _ in 0..10 {
        graph.turn_passed(stack);
    }
    assert_eq!(graph.val_of_kind(stack, SHIELD, Subtype::ANY), 2);
}

/// An until-own-turn bonus drops at the bearer's next turn regardless of
/// any turn counter.
#[test]
fn test_until_own_turn_drops_on_turn() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(SHIELD, 2, DurationSet::UNTIL_OWN_TURN));

    assert_eq!(graph.val_of_kind(stack, SHIELD, Subtype::ANY), 2);
    graph.turn_passed(stack);
    assert_eq!(graph.val_of_kind(stack, SHIELD, Subtype::ANY), 0);
}

/// Mixed list: only the expiring bonuses are removed.
#[test]
fn test_mixed_durations_decay_independently() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(HASTE, 3, DurationSet::N_TURNS).with_turns(1));
    graph.add_bonus(stack, spell(HASTE, 1, DurationSet::N_TURNS).with_turns(3));
    graph.add_bonus(stack, spell(SHIELD, 2, DurationSet::PERMANENT));

    graph.turn_passed(stack);
    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 1);
    assert_eq!(graph.val_of_kind(stack, SHIELD, Subtype::ANY), 2);
    assert_eq!(graph.node(stack).unwrap().exported_bonuses().len(), 2);
}

/// Lookahead selector: which bonuses will still be there in N turns.
#[test]
fn test_will_last_turns_lookahead() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(HASTE, 3, DurationSet::N_TURNS).with_turns(1));
    graph.add_bonus(stack, spell(HASTE, 1, DurationSet::N_TURNS).with_turns(4));
    graph.add_bonus(stack, spell(SHIELD, 2, DurationSet::PERMANENT));

    let lasting = Selector::will_last_turns(2);
    assert_eq!(graph.bonus_count(stack, &lasting), 2);
    assert_eq!(
        graph.val_of(stack, &Selector::kind(HASTE).and(lasting)),
        1,
        "only the 4-turn haste outlasts a 2-turn lookahead"
    );

    // Zero lookahead means everything currently active.
    assert_eq!(graph.bonus_count(stack, &Selector::will_last_turns(0)), 3);
}

/// Lookahead answers change as turns pass.
#[test]
fn test_lookahead_tracks_decay() {
    let mut graph = BonusGraph::new();
    let stack = graph.add_node(STACK);
    graph.add_bonus(stack, spell(HASTE, 3, DurationSet::N_TURNS).with_turns(3));

    let lasting = Selector::will_last_turns(1);
    assert_eq!(graph.bonus_count(stack, &lasting), 1);

    graph.turn_passed(stack);
    graph.turn_passed(stack);
    // One turn remains: it will not survive one more.
    assert_eq!(graph.bonus_count(stack, &lasting), 0);
    assert_eq!(graph.val_of_kind(stack, HASTE, Subtype::ANY), 3);
}
