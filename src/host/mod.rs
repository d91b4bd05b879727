//! Host platform interface: player lookup, permissions and output channels

pub mod events;
pub mod roster;

pub use events::HostEvent;
pub use roster::{PlayerPermissions, ReplayHost, RosterEntry};

use serde::{Deserialize, Serialize};

use crate::damage::PlayerId;

/// Team a player is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    Unassigned,
    Spectator,
    Terrorist,
    CounterTerrorist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connecting,
    #[default]
    Connected,
    Disconnecting,
    Disconnected,
}

fn default_pawn_valid() -> bool {
    true
}

/// Live data about a player, resolved from the host at handling time.
///
/// Never cached across events; the core only keeps `PlayerId`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub team: Team,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_hltv: bool,
    #[serde(default)]
    pub connection: ConnectionState,
    /// Whether the player currently controls an in-world pawn
    #[serde(default = "default_pawn_valid")]
    pub pawn_valid: bool,
    #[serde(default)]
    pub health: i32,
}

impl PlayerView {
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Health of the pawn while it exists and the player is connected
    pub fn live_health(&self) -> Option<i32> {
        (self.pawn_valid && self.is_connected()).then_some(self.health)
    }
}

/// Resolves player ids to live player data
pub trait PlayerDirectory {
    /// `None` for empty, invalid or stale slots
    fn player(&self, id: PlayerId) -> Option<PlayerView>;

    fn players(&self) -> Vec<PlayerView>;
}

/// Admin permission lookups used to gate center-screen notifications
pub trait PermissionProvider {
    fn has_capability(&self, id: PlayerId, capability: &str) -> bool;

    fn in_group(&self, id: PlayerId, group: &str) -> bool;

    fn has_override(&self, id: PlayerId, command: &str) -> bool;
}

/// Per-player output channels, all taking pre-formatted text
pub trait OutputSink {
    fn print_to_console(&mut self, id: PlayerId, text: &str);

    fn print_to_center(&mut self, id: PlayerId, text: &str);

    fn print_to_chat(&mut self, id: PlayerId, text: &str);
}

/// Everything the lifecycle controller needs from the platform
pub trait Host: PlayerDirectory + PermissionProvider + OutputSink {}

impl<T: PlayerDirectory + PermissionProvider + OutputSink> Host for T {}
