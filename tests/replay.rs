//! Replay integration tests.
//!
//! These drive the event stream loop end to end: JSON lines in, per-player
//! output lines out.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use round_damage_info::app::{run_event_stream, AppState, ReplayStats};
use round_damage_info::config::{Config, DamageInfoSettings};
use round_damage_info::damage::PlayerId;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

const ROSTER: &str = r#"
{"type":"player_update","player":{"id":1,"name":"alice","team":"terrorist","health":100}}
{"type":"player_update","player":{"id":2,"name":"bob","team":"counter_terrorist","health":100}}
"#;

fn state_with(settings: DamageInfoSettings) -> (AppState, SharedBuf) {
    let config = Config {
        log_level: "debug".to_string(),
        settings_path: PathBuf::from("does-not-exist.json"),
        rules_resolve_delay: Duration::ZERO,
    };
    let buf = SharedBuf::default();
    let state = AppState::new(config, settings, Box::new(buf.clone()));
    (state, buf)
}

fn open_settings() -> DamageInfoSettings {
    DamageInfoSettings {
        center_info_flags: Vec::new(),
        ..DamageInfoSettings::default()
    }
}

fn replay(state: &mut AppState, script: &str) -> ReplayStats {
    tokio_test::block_on(run_event_stream(state, script.as_bytes())).unwrap()
}

/// Test a full round: notifications, death summary, round end summary.
#[test]
fn test_round_replay() {
    let (mut state, out) = state_with(open_settings());

    let script = format!(
        "{}{}",
        ROSTER,
        r#"
{"type":"map_start","map":"de_dust2"}
{"type":"round_start"}
{"type":"player_hurt","victim":2,"attacker":1,"dmg_health":100,"dmg_armor":15,"hitgroup":1,"timestamp":"2026-10-17T12:00:00Z"}
this is not an event
{"type":"player_hurt","victim":2,"attacker":1,"dmg_health":26,"hitgroup":2,"timestamp":"2026-10-17T12:00:02Z"}
{"type":"player_death","victim":2,"attacker":1}
{"type":"round_end"}
"#
    );

    let stats = replay(&mut state, &script);
    assert_eq!(stats, ReplayStats { events: 8, skipped: 1 });

    let lines = out.lines();
    assert!(lines.contains(&"[center -> alice#1] Damage: 100 - Armor: 15 - HitGroup: Head".to_string()));
    assert!(lines.contains(&"[center -> alice#1] Deadly hit! Damage: 126 - HitGroup: Chest".to_string()));
    assert!(lines.contains(
        &"[chat -> bob#2] alice (100HP) | Taken: 126 in 2 hits | Given: 0 in 0 hits".to_string()
    ));
    assert!(lines.contains(
        &"[chat -> alice#1] bob (100HP) | Taken: 0 in 0 hits | Given: 126 in 2 hits".to_string()
    ));

    // bob saw his summary at death and not again at round end
    let bob_chat = lines.iter().filter(|l| l.starts_with("[chat -> bob#2]")).count();
    assert_eq!(bob_chat, 3);

    let controller = state.controller.lock();
    assert!(controller.ledger().is_empty());
    assert!(controller.is_displayed(PlayerId(2)));
}

/// Test that warmup damage is announced but never summarized.
#[test]
fn test_warmup_is_not_accounted() {
    let (mut state, out) = state_with(open_settings());

    let script = format!(
        "{}{}",
        ROSTER,
        r#"
{"type":"map_start","map":"de_inferno","warmup":true}
{"type":"player_hurt","victim":2,"attacker":1,"dmg_health":40}
{"type":"player_death","victim":2,"attacker":1}
{"type":"round_end"}
"#
    );

    replay(&mut state, &script);

    let lines = out.lines();
    assert!(lines.iter().any(|l| l.starts_with("[console -> alice#1]")));
    assert!(lines.iter().any(|l| l.starts_with("[console -> bob#2]")));
    assert!(!lines.iter().any(|l| l.starts_with("[chat")));
}

/// Test that warmup end opens accounting and spawns reset the summary gate.
#[test]
fn test_warmup_end_and_respawn() {
    let (mut state, out) = state_with(open_settings());

    let script = format!(
        "{}{}",
        ROSTER,
        r#"
{"type":"map_start","map":"de_nuke","warmup":true}
{"type":"warmup_end"}
{"type":"player_hurt","victim":2,"attacker":1,"dmg_health":40}
{"type":"player_death","victim":2,"attacker":1}
{"type":"player_spawn","id":2}
{"type":"round_start"}
{"type":"player_hurt","victim":2,"attacker":1,"dmg_health":10}
{"type":"player_death","victim":2,"attacker":1}
"#
    );

    replay(&mut state, &script);

    let lines = out.lines();
    assert!(lines.contains(
        &"[chat -> bob#2] alice (100HP) | Taken: 40 in 1 hits | Given: 0 in 0 hits".to_string()
    ));
    assert!(lines.contains(
        &"[chat -> bob#2] alice (100HP) | Taken: 10 in 1 hits | Given: 0 in 0 hits".to_string()
    ));
}

/// Test that reloading with a missing settings file applies defaults.
#[test]
fn test_reload_with_missing_file_uses_defaults() {
    let (mut state, _out) = state_with(DamageInfoSettings {
        ffa_mode: true,
        ..open_settings()
    });

    replay(&mut state, "{\"type\":\"reload_config\"}\n");

    // the file does not exist, so defaults are loaded
    let controller = state.controller.lock();
    assert!(!controller.settings().ffa_mode);
}

/// Test that a malformed settings file leaves the running settings in place.
#[test]
fn test_reload_with_malformed_file_keeps_settings() {
    let path = std::env::temp_dir().join(format!(
        "round_damage_info_reload_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "{ \"ffa-mode\": ").unwrap();

    let buf = SharedBuf::default();
    let config = Config {
        log_level: "debug".to_string(),
        settings_path: path.clone(),
        rules_resolve_delay: Duration::ZERO,
    };
    let mut state = AppState::new(
        config,
        DamageInfoSettings {
            ffa_mode: true,
            ..open_settings()
        },
        Box::new(buf),
    );

    replay(&mut state, "{\"type\":\"reload_config\"}\n");
    std::fs::remove_file(&path).ok();

    let controller = state.controller.lock();
    assert!(controller.settings().ffa_mode);
    assert!(controller.settings().center_info_flags.is_empty());
}

/// Test that removed players resolve as unknown in summaries.
#[test]
fn test_removed_opponent_is_unknown() {
    let (mut state, out) = state_with(open_settings());

    let script = format!(
        "{}{}",
        ROSTER,
        r#"
{"type":"map_start"}
{"type":"player_hurt","victim":1,"attacker":2,"dmg_health":35}
{"type":"player_remove","id":2}
{"type":"round_end"}
"#
    );

    replay(&mut state, &script);

    assert!(out.lines().contains(
        &"[chat -> alice#1] Unknown (DEAD) | Taken: 35 in 1 hits | Given: 0 in 0 hits".to_string()
    ));
}
