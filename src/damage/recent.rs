//! Rolling per-pair damage totals for center-screen notifications

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::PlayerId;

/// Gap after which a pair's running total starts over
pub const RECENT_DAMAGE_WINDOW_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentDamage {
    pub total_damage: u32,
    pub last_damage_time: DateTime<Utc>,
}

/// Damage dealt by an attacker to a victim within the latest unbroken window.
///
/// Independent of the match ledger; only drives the transient center text.
#[derive(Debug, Default)]
pub struct RecentDamageTracker {
    entries: HashMap<(PlayerId, PlayerId), RecentDamage>,
}

impl RecentDamageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hit and return the pair's running total.
    ///
    /// The gap is measured from the previous hit, so steady damage keeps
    /// the window open indefinitely.
    pub fn add_damage(
        &mut self,
        attacker: PlayerId,
        victim: PlayerId,
        amount: u32,
        now: DateTime<Utc>,
    ) -> u32 {
        let window = Duration::seconds(RECENT_DAMAGE_WINDOW_SECS);

        let entry = self
            .entries
            .entry((attacker, victim))
            .and_modify(|recent| {
                if now - recent.last_damage_time > window {
                    recent.total_damage = amount;
                } else {
                    recent.total_damage = recent.total_damage.saturating_add(amount);
                }
            })
            .or_insert(RecentDamage {
                total_damage: amount,
                last_damage_time: now,
            });

        entry.last_damage_time = now;
        entry.total_damage
    }

    pub fn get(&self, attacker: PlayerId, victim: PlayerId) -> Option<&RecentDamage> {
        self.entries.get(&(attacker, victim))
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
