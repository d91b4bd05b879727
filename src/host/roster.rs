//! In-memory host used by the replay binary

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::damage::PlayerId;

use super::{OutputSink, PermissionProvider, PlayerDirectory, PlayerView};

/// Admin data attached to a roster entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPermissions {
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub overrides: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub view: PlayerView,
    #[serde(default)]
    pub permissions: PlayerPermissions,
}

/// Roster kept from `player_update` events, with output written as text lines
pub struct ReplayHost {
    roster: BTreeMap<PlayerId, RosterEntry>,
    out: Box<dyn Write + Send>,
}

impl ReplayHost {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            roster: BTreeMap::new(),
            out,
        }
    }

    pub fn upsert(&mut self, entry: RosterEntry) {
        self.roster.insert(entry.view.id, entry);
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<RosterEntry> {
        self.roster.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    fn write_line(&mut self, channel: &str, id: PlayerId, text: &str) {
        let name = self
            .roster
            .get(&id)
            .map(|entry| entry.view.name.as_str())
            .unwrap_or("?");

        if let Err(e) = writeln!(self.out, "[{} -> {}#{}] {}", channel, name, id, text) {
            warn!(error = %e, channel, player = %id, "Failed to write output line");
        }
    }

    fn permissions(&self, id: PlayerId) -> Option<&PlayerPermissions> {
        self.roster.get(&id).map(|entry| &entry.permissions)
    }
}

impl PlayerDirectory for ReplayHost {
    fn player(&self, id: PlayerId) -> Option<PlayerView> {
        self.roster.get(&id).map(|entry| entry.view.clone())
    }

    fn players(&self) -> Vec<PlayerView> {
        self.roster.values().map(|entry| entry.view.clone()).collect()
    }
}

impl PermissionProvider for ReplayHost {
    fn has_capability(&self, id: PlayerId, capability: &str) -> bool {
        self.permissions(id)
            .is_some_and(|p| p.capabilities.iter().any(|c| c == capability))
    }

    fn in_group(&self, id: PlayerId, group: &str) -> bool {
        self.permissions(id)
            .is_some_and(|p| p.groups.iter().any(|g| g == group))
    }

    fn has_override(&self, id: PlayerId, command: &str) -> bool {
        self.permissions(id)
            .is_some_and(|p| p.overrides.iter().any(|o| o == command))
    }
}

impl OutputSink for ReplayHost {
    fn print_to_console(&mut self, id: PlayerId, text: &str) {
        self.write_line("console", id, text);
    }

    fn print_to_center(&mut self, id: PlayerId, text: &str) {
        self.write_line("center", id, text);
    }

    fn print_to_chat(&mut self, id: PlayerId, text: &str) {
        self.write_line("chat", id, text);
    }
}
