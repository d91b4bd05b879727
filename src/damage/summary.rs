//! Summary aggregation and top-N rankings

use std::collections::{BTreeMap, HashSet};

use super::{DamageStat, MatchLedger, PlayerId, PlayerLedger};

/// Number of rows shown per ranked list
pub const SUMMARY_TOP_N: usize = 5;

/// A player's damage folded over every opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSummary {
    pub given: DamageStat,
    pub taken: DamageStat,
}

/// One data line of a rendered summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    /// Player the line is about
    pub player: PlayerId,
    pub taken: DamageStat,
    pub given: DamageStat,
}

/// Which opponents a personal summary may list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentFilter {
    Any,
    /// Only the viewer's last killer; nobody when they were not killed by a player
    KillerOnly(Option<PlayerId>),
}

impl OpponentFilter {
    pub fn admits(&self, opponent: PlayerId) -> bool {
        match self {
            Self::Any => true,
            Self::KillerOnly(killer) => *killer == Some(opponent),
        }
    }
}

pub fn summarize(ledger: &PlayerLedger) -> PlayerSummary {
    let mut summary = PlayerSummary::default();
    for stat in ledger.given.values() {
        summary.given.absorb(stat);
    }
    for stat in ledger.taken.values() {
        summary.taken.absorb(stat);
    }
    summary
}

/// Highest `key` first, keeping the input order among ties, at most `n` items
pub fn top_n_by<T, F>(mut items: Vec<T>, n: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> u32,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(n);
    items
}

/// Opponents ranked by total damage; ties keep ascending id order
pub fn top_n(entries: &BTreeMap<PlayerId, DamageStat>, n: usize) -> Vec<(PlayerId, DamageStat)> {
    let items = entries.iter().map(|(id, stat)| (*id, *stat)).collect();
    top_n_by(items, n, |(_, stat)| stat.total_damage)
}

/// Every player ranked by damage taken, then every player ranked by damage
/// given, each list cut to `n` before `include` is consulted.
///
/// A player may appear in both lists.
pub fn all_players_view<F>(ledger: &MatchLedger, n: usize, mut include: F) -> Vec<SummaryRow>
where
    F: FnMut(PlayerId) -> bool,
{
    let summaries: Vec<(PlayerId, PlayerSummary)> = ledger
        .iter()
        .map(|(id, player_ledger)| (id, summarize(player_ledger)))
        .collect();

    let top_taken = top_n_by(summaries.clone(), n, |(_, s)| s.taken.total_damage);
    let top_given = top_n_by(summaries, n, |(_, s)| s.given.total_damage);

    top_taken
        .into_iter()
        .chain(top_given)
        .filter(|(id, _)| include(*id))
        .map(|(player, summary)| SummaryRow {
            player,
            taken: summary.taken,
            given: summary.given,
        })
        .collect()
}

/// The viewer's own exchanges, opponent by opponent.
///
/// Opponents from the top-`n` taken list come first and are not repeated
/// when the top-`n` given list is walked.
pub fn personal_view(own: &PlayerLedger, n: usize, filter: OpponentFilter) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    let mut processed = HashSet::new();

    for (opponent, taken) in top_n(&own.taken, n) {
        if !filter.admits(opponent) {
            continue;
        }
        processed.insert(opponent);
        rows.push(SummaryRow {
            player: opponent,
            taken,
            given: own.given_to(opponent),
        });
    }

    for (opponent, given) in top_n(&own.given, n) {
        if !filter.admits(opponent) || processed.contains(&opponent) {
            continue;
        }
        rows.push(SummaryRow {
            player: opponent,
            taken: own.taken_from(opponent),
            given,
        });
    }

    rows
}
