//! Application state for the replay host

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{load_settings, Config, DamageInfoSettings};
use crate::host::{HostEvent, ReplayHost};
use crate::lifecycle::{GameRules, HurtEvent, LifecycleController, SharedController};
use crate::render::Hitgroup;

/// Everything the event loop touches
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: SharedController,
    pub host: ReplayHost,
}

impl AppState {
    pub fn new(config: Config, settings: DamageInfoSettings, out: Box<dyn Write + Send>) -> Self {
        Self {
            config: Arc::new(config),
            controller: LifecycleController::new(settings).into_shared(),
            host: ReplayHost::new(out),
        }
    }

    /// Apply one host event.
    ///
    /// Must run inside a Tokio runtime: map starts schedule the delayed
    /// game rules resolution.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::PlayerUpdate { player } => {
                self.host.upsert(player);
            }
            HostEvent::PlayerRemove { id } => {
                if self.host.remove(id).is_none() {
                    debug!(player = %id, "Removal of unknown player");
                }
            }
            HostEvent::MapStart { map, warmup } => {
                let generation = self.controller.lock().on_map_start(map.as_deref());
                self.schedule_game_rules(generation, GameRules { warmup });
            }
            HostEvent::WarmupEnd => {
                self.controller.lock().on_warmup_end();
            }
            HostEvent::PlayerSpawn { id } => {
                self.controller.lock().on_player_spawn(&self.host, id);
            }
            HostEvent::PlayerHurt {
                victim,
                attacker,
                dmg_health,
                dmg_armor,
                hitgroup,
                timestamp,
            } => {
                let event = HurtEvent {
                    victim,
                    attacker,
                    dmg_health,
                    dmg_armor,
                    hitgroup: Hitgroup::from_code(hitgroup),
                    timestamp,
                };
                self.controller.lock().on_player_hurt(&mut self.host, event);
            }
            HostEvent::PlayerDeath { victim, attacker } => {
                self.controller
                    .lock()
                    .on_player_death(&mut self.host, victim, attacker);
            }
            HostEvent::RoundStart => {
                self.controller.lock().on_round_start();
            }
            HostEvent::RoundEnd => {
                self.controller.lock().on_round_end(&mut self.host);
            }
            HostEvent::ReloadConfig => self.reload_settings(),
        }
    }

    /// Resolve the game rules once the host has had time to settle
    fn schedule_game_rules(&self, generation: u64, rules: GameRules) {
        let delay: Duration = self.config.rules_resolve_delay;
        if delay.is_zero() {
            self.controller.lock().resolve_game_rules(generation, rules);
            return;
        }

        let controller = self.controller.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.lock().resolve_game_rules(generation, rules);
        });
    }

    fn reload_settings(&mut self) {
        match load_settings(&self.config.settings_path) {
            Ok(settings) => {
                self.controller.lock().apply_settings(settings);
                info!(path = %self.config.settings_path.display(), "Settings reloaded");
            }
            Err(e) => {
                warn!(error = %e, "Settings reload failed, keeping current settings");
            }
        }
    }
}
