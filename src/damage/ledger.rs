//! Match ledger - per-player damage given to and taken from other players

use std::collections::BTreeMap;

use super::PlayerId;

/// Accumulated damage against one opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageStat {
    pub total_damage: u32,
    pub hits: u32,
}

impl DamageStat {
    pub fn new(total_damage: u32, hits: u32) -> Self {
        Self { total_damage, hits }
    }

    /// Count one hit of `amount` damage
    pub fn add_hit(&mut self, amount: u32) {
        self.total_damage = self.total_damage.saturating_add(amount);
        self.hits = self.hits.saturating_add(1);
    }

    /// Fold another stat into this one
    pub fn absorb(&mut self, other: &DamageStat) {
        self.total_damage = self.total_damage.saturating_add(other.total_damage);
        self.hits = self.hits.saturating_add(other.hits);
    }
}

/// Damage one player dealt to and received from each opponent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerLedger {
    pub given: BTreeMap<PlayerId, DamageStat>,
    pub taken: BTreeMap<PlayerId, DamageStat>,
}

impl PlayerLedger {
    pub const fn new() -> Self {
        Self {
            given: BTreeMap::new(),
            taken: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.given.is_empty() && self.taken.is_empty()
    }

    /// Damage given to `opponent`, zero if none was recorded
    pub fn given_to(&self, opponent: PlayerId) -> DamageStat {
        self.given.get(&opponent).copied().unwrap_or_default()
    }

    /// Damage taken from `opponent`, zero if none was recorded
    pub fn taken_from(&self, opponent: PlayerId) -> DamageStat {
        self.taken.get(&opponent).copied().unwrap_or_default()
    }
}

static EMPTY_LEDGER: PlayerLedger = PlayerLedger::new();

/// Session-scoped ledger of every player's damage exchanges
#[derive(Debug, Default)]
pub struct MatchLedger {
    players: BTreeMap<PlayerId, PlayerLedger>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit from `attacker` on `victim`.
    ///
    /// The attacker's `given[victim]` and the victim's `taken[attacker]`
    /// are updated together so the two sides always agree. Self-damage is
    /// filtered by the caller.
    pub fn record_damage(&mut self, attacker: PlayerId, victim: PlayerId, amount: u32) {
        self.players
            .entry(attacker)
            .or_default()
            .given
            .entry(victim)
            .or_default()
            .add_hit(amount);

        self.players
            .entry(victim)
            .or_default()
            .taken
            .entry(attacker)
            .or_default()
            .add_hit(amount);
    }

    /// Drop the given/taken entries of `id`'s own ledger.
    ///
    /// Other players' entries that point at `id` are left untouched.
    pub fn clear_player(&mut self, id: PlayerId) {
        if let Some(ledger) = self.players.get_mut(&id) {
            ledger.given.clear();
            ledger.taken.clear();
        }
    }

    pub fn clear_all(&mut self) {
        self.players.clear();
    }

    /// Read-only view of a player's ledger, empty if they have none
    pub fn snapshot(&self, id: PlayerId) -> &PlayerLedger {
        self.players.get(&id).unwrap_or(&EMPTY_LEDGER)
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerLedger> {
        self.players.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerLedger)> {
        self.players.iter().map(|(id, ledger)| (*id, ledger))
    }

    /// Number of players that own a ledger entry
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
