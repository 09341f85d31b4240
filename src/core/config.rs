//! Engine configuration.
//!
//! A `GraphConfig` is fixed at graph construction. Defaults suit a
//! turn-based simulation; tune only when a game hits the deferred-limiter
//! iteration cap or wants caching off for debugging.

use serde::{Deserialize, Serialize};

/// Default bound on deferred-limiter resolution rounds, also used by
/// contextless list queries that never see a `GraphConfig`.
pub const DEFAULT_DEFER_ITERATION_CAP: usize = 16;

/// Tunable knobs for a `BonusGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Upper bound on deferred-limiter resolution rounds. When the cap is
    /// reached, bonuses still deferred are discarded deterministically.
    pub defer_iteration_cap: usize,

    /// Whether per-node query result caching is enabled.
    pub caching_enabled: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            defer_iteration_cap: DEFAULT_DEFER_ITERATION_CAP,
            caching_enabled: true,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deferred-limiter iteration cap.
    ///
    /// Panics if `cap` is zero: at least one resolution round must run.
    #[must_use]
    pub fn with_defer_iteration_cap(mut self, cap: usize) -> Self {
        assert!(cap > 0, "defer iteration cap must be at least 1");
        self.defer_iteration_cap = cap;
        self
    }

    /// Enable or disable query caching.
    #[must_use]
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching_enabled = enabled;
        self
    }
}
