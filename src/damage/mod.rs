//! Damage accounting: match ledger, rolling center-screen totals, summaries

pub mod ledger;
pub mod recent;
pub mod summary;

pub use ledger::{DamageStat, MatchLedger, PlayerLedger};
pub use recent::RecentDamageTracker;
pub use summary::{PlayerSummary, SummaryRow};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slot of a connected participant in the current match.
///
/// Slots are reused after a disconnect, so an id only identifies a player
/// for as long as they hold the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(slot: u32) -> Self {
        Self(slot)
    }
}
