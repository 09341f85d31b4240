//! Symbolic name registry.
//!
//! External configuration data (scenario files, modding data) refers to
//! bonus kinds, sources, durations, value kinds, and stock limiter or
//! propagator instances by name. The registry supplies the name↔tag
//! round-trips; it does not own the names' meanings.
//!
//! Duration flags and value kinds ship pre-registered under their
//! canonical names; kinds and sources are game-defined and registered at
//! startup with auto-assigned tags.

use rustc_hash::FxHashMap;

use crate::core::{BonusKind, DurationSet, SourceKind, ValueKind};
use crate::limiter::LimiterChain;
use crate::policy::Propagator;

/// Bidirectional name↔tag maps plus stock policy instances.
#[derive(Clone, Debug)]
pub struct TagRegistry {
    kinds: FxHashMap<String, BonusKind>,
    kind_names: FxHashMap<BonusKind, String>,
    next_kind: u16,

    sources: FxHashMap<String, SourceKind>,
    source_names: FxHashMap<SourceKind, String>,
    next_source: u8,

    durations: FxHashMap<String, DurationSet>,
    value_kinds: FxHashMap<String, ValueKind>,

    limiters: FxHashMap<String, LimiterChain>,
    propagators: FxHashMap<String, Propagator>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut durations = FxHashMap::default();
        durations.insert("PERMANENT".to_string(), DurationSet::PERMANENT);
        durations.insert("ONE_BATTLE".to_string(), DurationSet::ONE_BATTLE);
        durations.insert("ONE_DAY".to_string(), DurationSet::ONE_DAY);
        durations.insert("ONE_WEEK".to_string(), DurationSet::ONE_WEEK);
        durations.insert("N_TURNS".to_string(), DurationSet::N_TURNS);
        durations.insert("N_DAYS".to_string(), DurationSet::N_DAYS);
        durations.insert("UNTIL_ATTACK".to_string(), DurationSet::UNTIL_ATTACK);
        durations.insert(
            "UNTIL_BEING_ATTACKED".to_string(),
            DurationSet::UNTIL_BEING_ATTACKED,
        );
        durations.insert("UNTIL_OWN_TURN".to_string(), DurationSet::UNTIL_OWN_TURN);

        let mut value_kinds = FxHashMap::default();
        value_kinds.insert("ADDITIVE_VALUE".to_string(), ValueKind::Additive);
        value_kinds.insert("BASE_NUMBER".to_string(), ValueKind::Base);
        value_kinds.insert("PERCENT_TO_ALL".to_string(), ValueKind::PercentToAll);
        value_kinds.insert("PERCENT_TO_BASE".to_string(), ValueKind::PercentToBase);
        value_kinds.insert("INDEPENDENT_MAX".to_string(), ValueKind::IndependentMax);
        value_kinds.insert("INDEPENDENT_MIN".to_string(), ValueKind::IndependentMin);

        Self {
            kinds: FxHashMap::default(),
            kind_names: FxHashMap::default(),
            next_kind: 0,
            sources: FxHashMap::default(),
            source_names: FxHashMap::default(),
            next_source: 0,
            durations,
            value_kinds,
            limiters: FxHashMap::default(),
            propagators: FxHashMap::default(),
        }
    }

    // === Bonus kinds ===

    /// Register a bonus kind and return its auto-assigned tag.
    ///
    /// Panics if the name is already registered.
    pub fn register_kind(&mut self, name: impl Into<String>) -> BonusKind {
        let name = name.into();
        if self.kinds.contains_key(&name) {
            panic!("bonus kind {name:?} already registered");
        }
        let kind = BonusKind::new(self.next_kind);
        self.next_kind += 1;
        self.kinds.insert(name.clone(), kind);
        self.kind_names.insert(kind, name);
        kind
    }

    #[must_use]
    pub fn kind(&self, name: &str) -> Option<BonusKind> {
        self.kinds.get(name).copied()
    }

    #[must_use]
    pub fn kind_name(&self, kind: BonusKind) -> Option<&str> {
        self.kind_names.get(&kind).map(String::as_str)
    }

    // === Source kinds ===

    /// Register a source kind and return its auto-assigned tag.
    ///
    /// Panics if the name is already registered.
    pub fn register_source(&mut self, name: impl Into<String>) -> SourceKind {
        let name = name.into();
        if self.sources.contains_key(&name) {
            panic!("bonus source {name:?} already registered");
        }
        let source = SourceKind::new(self.next_source);
        self.next_source += 1;
        self.sources.insert(name.clone(), source);
        self.source_names.insert(source, name);
        source
    }

    #[must_use]
    pub fn source(&self, name: &str) -> Option<SourceKind> {
        self.sources.get(name).copied()
    }

    #[must_use]
    pub fn source_name(&self, source: SourceKind) -> Option<&str> {
        self.source_names.get(&source).map(String::as_str)
    }

    // === Durations and value kinds ===

    #[must_use]
    pub fn duration(&self, name: &str) -> Option<DurationSet> {
        self.durations.get(name).copied()
    }

    #[must_use]
    pub fn duration_name(&self, duration: DurationSet) -> Option<&str> {
        self.durations
            .iter()
            .find(|(_, &d)| d == duration)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn value_kind(&self, name: &str) -> Option<ValueKind> {
        self.value_kinds.get(name).copied()
    }

    // === Stock limiters and propagators ===

    /// Register a named limiter chain for reuse from configuration data.
    ///
    /// Panics if the name is already registered.
    pub fn register_limiter(&mut self, name: impl Into<String>, chain: LimiterChain) {
        let name = name.into();
        if self.limiters.contains_key(&name) {
            panic!("limiter {name:?} already registered");
        }
        self.limiters.insert(name, chain);
    }

    #[must_use]
    pub fn limiter(&self, name: &str) -> Option<&LimiterChain> {
        self.limiters.get(name)
    }

    /// Register a named propagator.
    ///
    /// Panics if the name is already registered.
    pub fn register_propagator(&mut self, name: impl Into<String>, propagator: Propagator) {
        let name = name.into();
        if self.propagators.contains_key(&name) {
            panic!("propagator {name:?} already registered");
        }
        self.propagators.insert(name, propagator);
    }

    #[must_use]
    pub fn propagator(&self, name: &str) -> Option<&Propagator> {
        self.propagators.get(name)
    }
}
