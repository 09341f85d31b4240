//! Bonus lifetime rules.
//!
//! A bonus carries a *set* of duration flags: it stays alive until the
//! first applicable rule expires it. `N_TURNS` is the only flag paired
//! with a counter (`Bonus::turns_remain`); the rest are event-driven and
//! stripped by the owning node when the matching event happens.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bitset of bonus lifetime rules.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DurationSet: u16 {
        /// Never removed automatically.
        const PERMANENT = 1;
        /// Removed at the end of the battle.
        const ONE_BATTLE = 1 << 1;
        /// Removed at the end of the day.
        const ONE_DAY = 1 << 2;
        /// Removed at the end of the week (not seven days from creation).
        const ONE_WEEK = 1 << 3;
        /// Counts down `turns_remain` each battle turn; removed at zero.
        const N_TURNS = 1 << 4;
        /// Counts down in days rather than battle turns.
        const N_DAYS = 1 << 5;
        /// Removed once the bearer has attacked.
        const UNTIL_ATTACK = 1 << 6;
        /// Removed once the bearer has been attacked.
        const UNTIL_BEING_ATTACKED = 1 << 7;
        /// Removed when the bearer gets its own turn (defensive stance).
        const UNTIL_OWN_TURN = 1 << 8;
    }
}

impl Default for DurationSet {
    fn default() -> Self {
        Self::PERMANENT
    }
}

impl DurationSet {
    /// True if the bonus expires by counting battle turns.
    #[must_use]
    pub fn is_turn_counted(self) -> bool {
        self.contains(Self::N_TURNS)
    }
}
