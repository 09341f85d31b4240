//! The bonus value object.
//!
//! A `Bonus` is a single tagged, valued, time-limited modifier. It is
//! created free-standing (usually via `Bonus::new` plus builder calls),
//! then handed to a node which becomes its owner. Lists and query results
//! share it by reference (`SharedBonus`); reference identity is what
//! duplicate elimination and removal compare.
//!
//! `val` and `turns_remain` live in `Cell`s: accumulation and turn decay
//! mutate them in place while shared references stay coherent.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{BonusKind, BonusSource, DurationSet, SourceId, SourceKind, Subtype, ValueKind};
use crate::limiter::LimiterChain;
use crate::policy::{Calculator, Propagator};

/// Shared handle to a bonus. Ownership lives with the attached node;
/// every other holder is a read-side reference.
pub type SharedBonus = Rc<Bonus>;

/// A single tagged, valued, time-limited modifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bonus {
    /// Lifetime rules; see `DurationSet`.
    pub duration: DurationSet,
    /// Turns left, meaningful only with the `N_TURNS` duration flag.
    pub turns_remain: Cell<i32>,
    /// What the bonus modifies. Opaque to the engine.
    pub kind: BonusKind,
    /// Disambiguates `kind`; `Subtype::ANY` means not applicable.
    pub subtype: Subtype,
    /// Provenance: who granted the bonus.
    pub source: BonusSource,
    /// Stored numeric value, unless a calculator overrides it.
    pub val: Cell<i64>,
    /// How `val` folds into an aggregate.
    pub val_kind: ValueKind,
    /// Free-form secondary parameter, interpreted per kind.
    pub info: i64,
    /// Filter chain deciding where the bonus applies.
    pub limiter: Option<LimiterChain>,
    /// Policy broadcasting the bonus to matching descendant nodes.
    pub propagator: Option<Propagator>,
    /// Policy recomputing the value per query context.
    pub calculator: Option<Calculator>,
    /// Human-readable label, formatted by external consumers only.
    pub description: String,
}

impl Bonus {
    /// Create a bonus with the given tag, duration, value, and provenance.
    /// Subtype defaults to the wildcard; value kind to additive.
    #[must_use]
    pub fn new(kind: BonusKind, duration: DurationSet, val: i64, source: BonusSource) -> Self {
        Self {
            duration,
            turns_remain: Cell::new(0),
            kind,
            subtype: Subtype::ANY,
            source,
            val: Cell::new(val),
            val_kind: ValueKind::Additive,
            info: 0,
            limiter: None,
            propagator: None,
            calculator: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = subtype;
        self
    }

    #[must_use]
    pub fn with_turns(mut self, turns: i32) -> Self {
        self.turns_remain.set(turns);
        self
    }

    #[must_use]
    pub fn with_value_kind(mut self, val_kind: ValueKind) -> Self {
        self.val_kind = val_kind;
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: i64) -> Self {
        self.info = info;
        self
    }

    #[must_use]
    pub fn with_limiter(mut self, limiter: LimiterChain) -> Self {
        self.limiter = Some(limiter);
        self
    }

    #[must_use]
    pub fn with_propagator(mut self, propagator: Propagator) -> Self {
        self.propagator = Some(propagator);
        self
    }

    #[must_use]
    pub fn with_calculator(mut self, calculator: Calculator) -> Self {
        self.calculator = Some(calculator);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wrap into a shared handle.
    #[must_use]
    pub fn shared(self) -> SharedBonus {
        Rc::new(self)
    }

    // === Duration predicates ===

    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.duration.contains(DurationSet::PERMANENT)
    }

    #[must_use]
    pub fn one_battle(&self) -> bool {
        self.duration.contains(DurationSet::ONE_BATTLE)
    }

    #[must_use]
    pub fn one_day(&self) -> bool {
        self.duration.contains(DurationSet::ONE_DAY)
    }

    #[must_use]
    pub fn one_week(&self) -> bool {
        self.duration.contains(DurationSet::ONE_WEEK)
    }

    #[must_use]
    pub fn until_attack(&self) -> bool {
        self.duration.contains(DurationSet::UNTIL_ATTACK)
    }

    #[must_use]
    pub fn until_being_attacked(&self) -> bool {
        self.duration.contains(DurationSet::UNTIL_BEING_ATTACKED)
    }

    #[must_use]
    pub fn until_own_turn(&self) -> bool {
        self.duration.contains(DurationSet::UNTIL_OWN_TURN)
    }

    /// Provenance test honoring the `SourceId::ANY` sentinel.
    #[must_use]
    pub fn is_from(&self, kind: SourceKind, id: SourceId) -> bool {
        self.source.kind == kind && id.matches(self.source.id)
    }

    /// Add to the stored value in place.
    pub fn accumulate(&self, delta: i64) {
        self.val.set(self.val.get() + delta);
    }
}

impl std::fmt::Display for Bonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bonus[{} subtype={} val={}",
            self.kind,
            self.subtype.0,
            self.val.get()
        )?;
        if !self.description.is_empty() {
            write!(f, " \"{}\"", self.description)?;
        }
        write!(f, "]")
    }
}
