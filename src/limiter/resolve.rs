//! Deferred-limiter resolution.
//!
//! A Defer decision depends on which other bonuses get accepted in the
//! same pass, so candidates are re-evaluated in rounds until the accepted
//! set stabilizes. The round count is capped; bonuses still deferred at
//! the cap are discarded, which keeps contradictory mutual dependencies
//! from looping and makes the outcome deterministic.

use tracing::debug;

use crate::bonus::{BonusList, SharedBonus};
use crate::graph::NodeProfile;

use super::limiter::{Decision, LimitContext, LimiterChain};

/// Evaluate a bonus's own chain followed by an optional caller chain.
fn decide(
    bonus: &SharedBonus,
    extra: Option<&LimiterChain>,
    profile: Option<&NodeProfile>,
    accepted: &BonusList,
) -> Decision {
    let ctx = LimitContext {
        bonus: bonus.as_ref(),
        profile,
        accepted,
    };

    let mut deferred = false;
    for chain in bonus.limiter.iter().chain(extra) {
        match chain.evaluate(&ctx) {
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

/// Run limiter chains over `candidates` to a fixed point and return the
/// accepted bonuses.
///
/// Each round walks the still-undecided candidates in insertion order.
/// Accepted bonuses join the accepted set immediately and are visible to
/// later decisions in the same round. Rounds stop once nothing changes or
/// `iteration_cap` is reached; leftovers resolve as Discard.
#[must_use]
pub fn resolve_accepted(
    candidates: &BonusList,
    extra: Option<&LimiterChain>,
    profile: Option<&NodeProfile>,
    iteration_cap: usize,
) -> BonusList {
    let mut accepted = BonusList::new();
    let mut pending: Vec<SharedBonus> = candidates.iter().cloned().collect();

    for _ in 0..iteration_cap {
        if pending.is_empty() {
            break;
        }

        let mut still_deferred = Vec::new();
        let mut changed = false;

        for bonus in pending {
            match decide(&bonus, extra, profile, &accepted) {
                Decision::Accept => {
                    accepted.push(bonus);
                    changed = true;
                }
                Decision::Discard => changed = true,
                Decision::Defer => still_deferred.push(bonus),
            }
        }

        pending = still_deferred;
        if !changed {
            break;
        }
    }

    if !pending.is_empty() {
        debug!(
            unresolved = pending.len(),
            "deferred limiters did not converge; discarding leftovers"
        );
    }

    accepted
}
