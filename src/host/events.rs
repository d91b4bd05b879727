//! Host event wire types
//! One JSON object per line on the replay stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::damage::PlayerId;

use super::RosterEntry;

/// Events delivered by the host platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Insert or replace a roster entry
    PlayerUpdate {
        player: RosterEntry,
    },

    /// Slot freed by a disconnect
    PlayerRemove {
        id: PlayerId,
    },

    /// New map loaded; game rules resolve after a short delay
    MapStart {
        #[serde(default)]
        map: Option<String>,
        /// Whether the map starts in warmup
        #[serde(default)]
        warmup: bool,
    },

    WarmupEnd,

    PlayerSpawn {
        id: PlayerId,
    },

    PlayerHurt {
        victim: PlayerId,
        /// Missing for world or self-inflicted damage
        #[serde(default)]
        attacker: Option<PlayerId>,
        dmg_health: u32,
        #[serde(default)]
        dmg_armor: u32,
        #[serde(default)]
        hitgroup: i32,
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
    },

    PlayerDeath {
        victim: PlayerId,
        #[serde(default)]
        attacker: Option<PlayerId>,
    },

    RoundStart,

    RoundEnd,

    /// Re-read the settings file
    ReloadConfig,
}
