//! Configuration module - environment variables and the damage info settings file

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Schema version written by this build
pub const CURRENT_CONFIG_VERSION: u32 = 4;

/// Process configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Path of the JSON settings file
    pub settings_path: PathBuf,
    /// Delay between map start and reading the game rules
    pub rules_resolve_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let rules_resolve_delay = match env::var("RULES_RESOLVE_DELAY_MS") {
            Ok(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|_| ConfigError::Invalid("RULES_RESOLVE_DELAY_MS"))?,
            ),
            Err(_) => Duration::from_secs(1),
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            settings_path: env::var("DAMAGE_INFO_CONFIG")
                .unwrap_or_else(|_| "damage_info.json".to_string())
                .into(),
            rules_resolve_delay,
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_center_info_flags() -> Vec<String> {
    vec![
        "@myplugin/can-see-permission".to_string(),
        "#myplugin/can-see-group".to_string(),
        "can-see-override".to_string(),
        "leave-empty-so-let-everyone-see".to_string(),
    ]
}

fn default_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

/// Damage info behaviour, stored as JSON with hyphenated plugin-style keys
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageInfoSettings {
    /// Record damage and show summaries at round end
    #[serde(rename = "round-end-summary", default = "default_true")]
    pub round_end_summary: bool,
    /// Show the summary as soon as a player dies
    #[serde(rename = "round-end-summary-allow-death-print", default = "default_true")]
    pub allow_death_print: bool,
    /// Only list the player who got the kill
    #[serde(rename = "round-end-summary-show-only-killer", default)]
    pub show_only_killer: bool,
    /// Account damage between teammates
    #[serde(rename = "round-end-summary-show-friendlyfire", default)]
    pub show_friendly_fire: bool,
    /// Rank every player instead of the viewer's own exchanges
    #[serde(rename = "round-end-summary-show-all-damages", default)]
    pub show_all_damages: bool,
    #[serde(rename = "round-end-summary-show-all-damages-enemies-only", default = "default_true")]
    pub show_all_damages_enemies_only: bool,
    #[serde(rename = "center-damage-info", default = "default_true")]
    pub center_damage_info: bool,
    #[serde(rename = "console-damage-info", default = "default_true")]
    pub console_damage_info: bool,
    /// Free-for-all: teammates count as opponents
    #[serde(rename = "ffa-mode", default)]
    pub ffa_mode: bool,
    /// Keep stats across rounds, clearing a player's own entries when they die
    #[serde(rename = "norounds-mode", default)]
    pub no_rounds_mode: bool,
    /// Permission tokens gating center-screen info; empty lets everyone see it
    #[serde(rename = "center-info-flags", default = "default_center_info_flags")]
    pub center_info_flags: Vec<String>,
    #[serde(rename = "ConfigVersion", default = "default_version")]
    pub version: u32,
}

impl Default for DamageInfoSettings {
    fn default() -> Self {
        Self {
            round_end_summary: true,
            allow_death_print: true,
            show_only_killer: false,
            show_friendly_fire: false,
            show_all_damages: false,
            show_all_damages_enemies_only: true,
            center_damage_info: true,
            console_damage_info: true,
            ffa_mode: false,
            no_rounds_mode: false,
            center_info_flags: default_center_info_flags(),
            version: CURRENT_CONFIG_VERSION,
        }
    }
}

impl DamageInfoSettings {
    /// Warn when the stored settings predate the current schema.
    ///
    /// Values are used as-is; nothing is migrated.
    pub fn check_version(&self) -> bool {
        if self.version < CURRENT_CONFIG_VERSION {
            warn!(
                expected = CURRENT_CONFIG_VERSION,
                current = self.version,
                "Configuration version mismatch"
            );
            return false;
        }
        true
    }
}

/// Read the settings file, falling back to defaults when it does not exist
pub fn load_settings(path: &Path) -> Result<DamageInfoSettings, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(DamageInfoSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
