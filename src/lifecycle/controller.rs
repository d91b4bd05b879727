//! Lifecycle controller - owns the session's damage state and reacts to host events

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::DamageInfoSettings;
use crate::damage::summary::{all_players_view, personal_view, OpponentFilter, SUMMARY_TOP_N};
use crate::damage::{MatchLedger, PlayerId, RecentDamageTracker, SummaryRow};
use crate::host::{ConnectionState, Host, PlayerView, Team};
use crate::render::{self, CenterMessage, Hitgroup};

use super::permissions::{has_any_permission, parse_tokens, PermissionToken};

/// Controller shared between the event loop and the delayed rules task
pub type SharedController = Arc<Mutex<LifecycleController>>;

/// Game rules as read from the host once the map has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub warmup: bool,
}

/// A player hurt event with ids still unresolved
#[derive(Debug, Clone, Copy)]
pub struct HurtEvent {
    pub victim: PlayerId,
    pub attacker: Option<PlayerId>,
    pub dmg_health: u32,
    pub dmg_armor: u32,
    pub hitgroup: Hitgroup,
    pub timestamp: DateTime<Utc>,
}

/// Damage state for one match session
pub struct LifecycleController {
    session_id: Uuid,
    settings: DamageInfoSettings,
    center_flags: Vec<PermissionToken>,
    /// `None` until resolved after map start
    rules: Option<GameRules>,
    map_generation: u64,
    /// Set once the unresolved-rules warning was logged for this map
    unresolved_warned: bool,
    ledger: MatchLedger,
    recent: RecentDamageTracker,
    /// Players who saw their summary this life
    displayed: HashSet<PlayerId>,
    killer_of: BTreeMap<PlayerId, PlayerId>,
}

impl LifecycleController {
    pub fn new(settings: DamageInfoSettings) -> Self {
        settings.check_version();
        let center_flags = parse_tokens(&settings.center_info_flags);
        let session_id = Uuid::new_v4();

        info!(session_id = %session_id, "Damage session created");

        Self {
            session_id,
            settings,
            center_flags,
            rules: None,
            map_generation: 0,
            unresolved_warned: false,
            ledger: MatchLedger::new(),
            recent: RecentDamageTracker::new(),
            displayed: HashSet::new(),
            killer_of: BTreeMap::new(),
        }
    }

    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn settings(&self) -> &DamageInfoSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn recent(&self) -> &RecentDamageTracker {
        &self.recent
    }

    pub fn game_rules(&self) -> Option<GameRules> {
        self.rules
    }

    pub fn is_displayed(&self, id: PlayerId) -> bool {
        self.displayed.contains(&id)
    }

    pub fn killer_of(&self, id: PlayerId) -> Option<PlayerId> {
        self.killer_of.get(&id).copied()
    }

    /// Swap in reloaded settings; permission tokens are parsed again
    pub fn apply_settings(&mut self, settings: DamageInfoSettings) {
        settings.check_version();
        self.center_flags = parse_tokens(&settings.center_info_flags);
        self.settings = settings;
        info!(session_id = %self.session_id, "Settings applied");
    }

    /// Forget the game rules until the new map has settled.
    ///
    /// Returns the generation to pass to [`Self::resolve_game_rules`].
    pub fn on_map_start(&mut self, map: Option<&str>) -> u64 {
        self.map_generation += 1;
        self.rules = None;
        self.unresolved_warned = false;
        info!(
            session_id = %self.session_id,
            map = map.unwrap_or("unknown"),
            generation = self.map_generation,
            "Map started"
        );
        self.map_generation
    }

    /// Install the game rules read for `generation`; stale reads are ignored
    pub fn resolve_game_rules(&mut self, generation: u64, rules: GameRules) -> bool {
        if generation != self.map_generation {
            debug!(
                generation,
                current = self.map_generation,
                "Ignoring game rules from an earlier map"
            );
            return false;
        }
        self.rules = Some(rules);
        debug!(warmup = rules.warmup, "Game rules resolved");
        true
    }

    pub fn on_warmup_end(&mut self) {
        if let Some(rules) = self.rules.as_mut() {
            rules.warmup = false;
        }
    }

    /// Damage is only accounted once the rules are known and warmup is over
    fn accounting_active(&self) -> bool {
        matches!(self.rules, Some(GameRules { warmup: false }))
    }

    pub fn on_player_spawn<H: Host>(&mut self, host: &H, id: PlayerId) {
        let Some(player) = host.player(id).filter(|p| p.pawn_valid) else {
            trace!(player = %id, "Spawn for invalid player dropped");
            return;
        };

        self.displayed.remove(&player.id);
        self.killer_of.remove(&player.id);
    }

    pub fn on_player_hurt<H: Host>(&mut self, host: &mut H, event: HurtEvent) {
        let Some(victim) = host.player(event.victim).filter(|p| p.pawn_valid) else {
            trace!(player = %event.victim, "Hurt event for invalid victim dropped");
            return;
        };
        let Some(attacker) = event
            .attacker
            .and_then(|id| host.player(id))
            .filter(|p| p.pawn_valid)
        else {
            trace!(victim = %victim.id, "Hurt event without a valid attacker dropped");
            return;
        };

        if attacker.id == victim.id {
            return;
        }
        if victim.team == attacker.team && !self.settings.show_friendly_fire {
            return;
        }

        if !attacker.is_bot && (victim.team != attacker.team || self.settings.ffa_mode) {
            self.notify_hit(host, &attacker, &victim, &event);
        }

        if self.rules.is_none() && self.settings.round_end_summary && !self.unresolved_warned {
            self.unresolved_warned = true;
            warn!(
                session_id = %self.session_id,
                generation = self.map_generation,
                "Damage received before game rules resolved, not accounted"
            );
        }

        if !self.accounting_active() || !self.settings.round_end_summary {
            return;
        }

        self.ledger
            .record_damage(attacker.id, victim.id, event.dmg_health);
    }

    fn notify_hit<H: Host>(
        &mut self,
        host: &mut H,
        attacker: &PlayerView,
        victim: &PlayerView,
        event: &HurtEvent,
    ) {
        if self.settings.console_damage_info {
            host.print_to_console(
                attacker.id,
                &render::console_given(&victim.name, event.dmg_health, event.dmg_armor, event.hitgroup),
            );

            if !victim.is_bot {
                host.print_to_console(
                    victim.id,
                    &render::console_taken(&attacker.name, event.dmg_health, event.dmg_armor, event.hitgroup),
                );
            }
        }

        if self.settings.center_damage_info && has_any_permission(&self.center_flags, &*host, attacker.id) {
            let total = self
                .recent
                .add_damage(attacker.id, victim.id, event.dmg_health, event.timestamp);
            let message = CenterMessage::new(total, event.dmg_armor, event.hitgroup);
            host.print_to_center(attacker.id, &message.to_string());
        }
    }

    pub fn on_player_death<H: Host>(&mut self, host: &mut H, victim: PlayerId, attacker: Option<PlayerId>) {
        if !self.accounting_active() || !self.settings.allow_death_print {
            return;
        }

        let Some(victim) = host
            .player(victim)
            .filter(|p| p.pawn_valid && p.connection != ConnectionState::Disconnecting)
        else {
            trace!(player = %victim, "Death of invalid player dropped");
            return;
        };

        match attacker.and_then(|id| host.player(id)).filter(|p| p.pawn_valid) {
            Some(killer) => {
                self.killer_of.insert(victim.id, killer.id);
            }
            None => {
                self.killer_of.remove(&victim.id);
            }
        }

        self.display_damage_info(host, &victim);

        if self.settings.no_rounds_mode {
            self.ledger.clear_player(victim.id);
        }
    }

    pub fn on_round_start(&mut self) {
        self.ledger.clear_all();
        self.recent.clear_all();
        debug!(session_id = %self.session_id, "Round started, damage state cleared");
    }

    pub fn on_round_end<H: Host>(&mut self, host: &mut H) {
        if !self.settings.round_end_summary {
            return;
        }

        let viewers: Vec<PlayerView> = host
            .players()
            .into_iter()
            .filter(is_summary_viewer)
            .collect();

        info!(
            session_id = %self.session_id,
            viewers = viewers.len(),
            ledger_players = self.ledger.len(),
            "Round ended"
        );

        for viewer in &viewers {
            self.display_damage_info(host, viewer);
        }

        self.ledger.clear_all();
        self.recent.clear_all();
    }

    /// Show the viewer's summary once per life
    pub fn display_damage_info<H: Host>(&mut self, host: &mut H, viewer: &PlayerView) {
        if self.displayed.contains(&viewer.id) {
            return;
        }

        let rows = if self.settings.show_all_damages {
            self.displayed.insert(viewer.id);

            let enemies_only = self.settings.show_all_damages_enemies_only;
            let directory = &*host;
            all_players_view(&self.ledger, SUMMARY_TOP_N, |candidate| {
                !(enemies_only
                    && directory
                        .player(candidate)
                        .is_some_and(|p| p.team == viewer.team))
            })
        } else {
            let Some(own) = self.ledger.get(viewer.id) else {
                return;
            };
            self.displayed.insert(viewer.id);

            let filter = if self.settings.show_only_killer {
                OpponentFilter::KillerOnly(self.killer_of(viewer.id))
            } else {
                OpponentFilter::Any
            };
            personal_view(own, SUMMARY_TOP_N, filter)
        };

        debug!(player = %viewer.id, rows = rows.len(), "Damage summary displayed");
        print_summary(host, viewer.id, &rows);
    }
}

/// Human players in a team with a live connection and pawn
fn is_summary_viewer(player: &PlayerView) -> bool {
    player.pawn_valid
        && !player.is_bot
        && !player.is_hltv
        && player.is_connected()
        && !matches!(player.team, Team::Unassigned | Team::Spectator)
}

/// Chat the summary lines; nothing at all when there are no rows
fn print_summary<H: Host>(host: &mut H, viewer: PlayerId, rows: &[SummaryRow]) {
    if rows.is_empty() {
        return;
    }

    host.print_to_chat(viewer, render::summary_start_line());

    for row in rows {
        let other = host.player(row.player);
        let name = other
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| render::UNKNOWN_PLAYER.to_string());
        let health = render::health_status(other.as_ref().and_then(PlayerView::live_health));

        host.print_to_chat(
            viewer,
            &render::summary_data_line(&name, &health, &row.taken, &row.given),
        );
    }

    host.print_to_chat(viewer, render::summary_end_line());
}
